//! Display-name templating for frames
//!
//! Resolves the user-supplied alias pattern of a query against a series
//! row. Tokens come in two spellings, `[[token]]` and `$token`:
//!
//! - `m` / `measurement` - the query's measurement
//! - `col` - the current column label
//! - `N` - the N-th dot-separated segment of the series name
//! - `tag_<key>` - the value of tag `<key>`
//!
//! Tokens that cannot be resolved are left in the output unchanged.

use crate::decode::Row;
use crate::loader::Query;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for alias tokens: `[[name.sub]]` or `$name`
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[\[([@/A-Za-z0-9_-]+)(\.[@/A-Za-z0-9_-]+)*\]\]*|\$([\t\n\f\r ]*([@A-Za-z0-9_-]+?))*",
    )
    .unwrap()
});

/// Everything an alias token may be resolved against
#[derive(Debug)]
pub struct AliasContext<'a> {
    row: &'a Row,
    column: &'a str,
    query: &'a Query,
    segments: Vec<&'a str>,
}

impl<'a> AliasContext<'a> {
    /// Create a context for one column of a row
    pub fn new(row: &'a Row, column: &'a str, query: &'a Query) -> Self {
        Self {
            row,
            column,
            query,
            segments: row.name.split('.').collect(),
        }
    }
}

/// A resolution rule; `None` hands the token to the next rule
type AliasRule = fn(&str, &AliasContext<'_>) -> Option<String>;

/// Rules in the order they are tried
const ALIAS_RULES: [AliasRule; 4] = [
    resolve_measurement,
    resolve_column,
    resolve_name_segment,
    resolve_tag,
];

fn resolve_measurement(token: &str, ctx: &AliasContext<'_>) -> Option<String> {
    matches!(token, "m" | "measurement").then(|| ctx.query.measurement.clone())
}

fn resolve_column(token: &str, ctx: &AliasContext<'_>) -> Option<String> {
    (token == "col").then(|| ctx.column.to_string())
}

fn resolve_name_segment(token: &str, ctx: &AliasContext<'_>) -> Option<String> {
    let index = token.parse::<usize>().ok()?;
    ctx.segments.get(index).map(|s| (*s).to_string())
}

fn resolve_tag(token: &str, ctx: &AliasContext<'_>) -> Option<String> {
    let key = token.strip_prefix("tag_")?;
    ctx.row.tags.get(key).cloned()
}

/// Build the display name for one column of a row
///
/// Uses the query's alias pattern when it has one, and the default
/// `name.column { tag: value ... }` form otherwise.
pub fn frame_name(row: &Row, column: &str, query: &Query) -> String {
    if query.alias.is_empty() {
        default_frame_name(row, column)
    } else {
        render_alias(&query.alias, &AliasContext::new(row, column, query))
    }
}

/// Default display name: `"{name}.{column}"` plus a `{ key: value }` tag block
pub fn default_frame_name(row: &Row, column: &str) -> String {
    let tags: Vec<String> = row
        .tags
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect();

    let tag_text = if tags.is_empty() {
        String::new()
    } else {
        format!(" {{ {} }}", tags.join(" "))
    };

    format!("{}.{}{}", row.name, column, tag_text)
}

/// Substitute every alias token in `alias`
pub fn render_alias(alias: &str, ctx: &AliasContext<'_>) -> String {
    ALIAS_REGEX
        .replace_all(alias, |caps: &Captures<'_>| {
            let full_match = &caps[0];
            let token = strip_delimiters(full_match);

            ALIAS_RULES
                .iter()
                .find_map(|rule| rule(&token, ctx))
                // Unresolved tokens pass through untouched
                .unwrap_or_else(|| full_match.to_string())
        })
        .into_owned()
}

/// Remove the first `[[`, the first `]]` and the first `$`
fn strip_delimiters(token: &str) -> String {
    token
        .replacen("[[", "", 1)
        .replacen("]]", "", 1)
        .replacen('$', "", 1)
}
