//! Text and JSON rendering of API responses.

use crate::api::{ActionResponse, ListResponse, StatsResponse};
use serde::Serialize;
use std::io::{self, Write};

/// Output flavour selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn write_action(
    out: &mut impl Write,
    response: &ActionResponse,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", response.message),
        OutputFormat::Json => write_json(out, response),
    }
}

/// Writes the heading or empty-state line, then one line per book.
pub fn write_list(
    out: &mut impl Write,
    response: &ListResponse,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", response.message)?;
            for book in &response.items {
                writeln!(out, "  {book}")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, response),
    }
}

pub fn write_stats(
    out: &mut impl Write,
    response: &StatsResponse,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", response.message),
        OutputFormat::Json => write_json(out, response),
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
