//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ParserConfig;
use crate::error::{Error, Result, ResultExt};
use crate::loader::load_queries;
use crate::output::{write_frames_to_dir, Frame, TIME_FIELD, VALUE_FIELD};
use crate::response::{QueryDataResponse, ResponseParser};
use crate::types::LogLevel;
use serde_json::json;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Log level implied by the flags
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run the CLI command, writing results to `out`
    pub fn run_with_output(&self, out: &mut dyn Write) -> Result<()> {
        match &self.cli.command {
            Commands::Parse {
                response,
                queries,
                output,
            } => self.parse(response, queries, output.as_deref(), out),
            Commands::Validate { queries } => self.validate(queries, out),
        }
    }

    /// Load the parser configuration
    fn load_config(&self) -> Result<ParserConfig> {
        match &self.cli.config {
            Some(path) => ParserConfig::load(path),
            None => Ok(ParserConfig::default()),
        }
    }

    fn parse(
        &self,
        response_path: &Path,
        queries_path: &Path,
        output_dir: Option<&Path>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let parser = ResponseParser::with_config(self.load_config()?);
        let queries = load_queries(queries_path)?;

        let response = if response_path.as_os_str() == "-" {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            parser.parse(&mut reader, &queries)
        } else {
            let mut file = File::open(response_path).with_context(|| {
                format!("Failed to open response file '{}'", response_path.display())
            })?;
            parser.parse(&mut file, &queries)
        };

        match self.cli.format {
            OutputFormat::Json => write_json(&response, out),
            OutputFormat::Pretty => write_pretty(&response, out),
            OutputFormat::Parquet => {
                let dir = output_dir
                    .ok_or_else(|| Error::config("Parquet output requires --output <dir>"))?;
                write_parquet(&response, dir, out)
            }
        }
    }

    fn validate(&self, queries_path: &Path, out: &mut dyn Write) -> Result<()> {
        let queries = load_queries(queries_path)?;
        writeln!(out, "✓ {} queries are valid", queries.len())?;
        for query in &queries {
            let alias = if query.alias.is_empty() {
                "(default naming)"
            } else {
                query.alias.as_str()
            };
            writeln!(out, "  {}: {}", query.ref_id, alias)?;
        }
        Ok(())
    }
}

/// One JSON line per ref id
fn write_json(response: &QueryDataResponse, out: &mut dyn Write) -> Result<()> {
    for (ref_id, data) in response.iter() {
        let mut line = data.to_json()?;
        if let Some(obj) = line.as_object_mut() {
            obj.insert("refId".to_string(), json!(ref_id));
        }
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}

/// Human-readable summary
fn write_pretty(response: &QueryDataResponse, out: &mut dyn Write) -> Result<()> {
    for (ref_id, data) in response.iter() {
        if let Some(error) = data.error() {
            writeln!(out, "{ref_id}: error: {error}")?;
            continue;
        }

        writeln!(out, "{ref_id}: {} frame(s)", data.frames().len())?;
        for frame in data.frames() {
            write_frame_summary(frame, out)?;
        }
    }
    Ok(())
}

fn write_frame_summary(frame: &Frame, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "  {} ({} rows)", frame.name(), frame.num_rows())?;

    if let (Some(times), Some(values)) = (frame.times(TIME_FIELD), frame.floats(VALUE_FIELD)) {
        for (time, value) in times.iter().zip(&values) {
            let value = value.map_or_else(|| "null".to_string(), |v| v.to_string());
            writeln!(out, "    {} {value}", time.to_rfc3339())?;
        }
    } else if let Some(values) = frame.strings(VALUE_FIELD) {
        for value in values {
            writeln!(out, "    {}", value.as_deref().unwrap_or("null"))?;
        }
    }
    Ok(())
}

/// One parquet file per frame
fn write_parquet(response: &QueryDataResponse, dir: &Path, out: &mut dyn Write) -> Result<()> {
    for (ref_id, data) in response.iter() {
        if let Some(error) = data.error() {
            writeln!(out, "{ref_id}: error: {error}")?;
            continue;
        }

        for path in write_frames_to_dir(dir, ref_id, data.frames(), None)? {
            writeln!(out, "{ref_id}: wrote {}", path.display())?;
        }
    }
    Ok(())
}
