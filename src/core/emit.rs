//! Renders merged property tables as source text or data files.

use crate::domain::model::{PropertyTable, Range};
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest code point that gets the `// Basic Latin` annotation.
const BASIC_LATIN_END: u32 = 0x7F;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C header with `UnicodeRange` arrays and counts.
    #[default]
    C,
    /// Rust `static` arrays of `(u32, u32)` pairs.
    Rust,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::C => "h",
            OutputFormat::Rust => "rs",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::C => "c",
            OutputFormat::Rust => "rust",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// JSON document layout; deserializes back into the same tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub origin: String,
    pub tables: Vec<PropertyTable>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    property: &'a str,
    start: String,
    end: String,
}

pub fn render(format: OutputFormat, origin: &str, tables: &[PropertyTable]) -> Result<String> {
    match format {
        OutputFormat::C => Ok(render_c(origin, tables)),
        OutputFormat::Rust => Ok(render_rust(origin, tables)),
        OutputFormat::Json => render_json(origin, tables),
        OutputFormat::Csv => render_csv(tables),
    }
}

fn hex(code_point: u32) -> String {
    format!("0x{code_point:04X}")
}

fn annotation(range: &Range) -> &'static str {
    if range.start <= BASIC_LATIN_END {
        " // Basic Latin"
    } else {
        ""
    }
}

pub fn render_c(origin: &str, tables: &[PropertyTable]) -> String {
    let mut lines = vec![
        format!("// Source: {origin}"),
        "#include <stdint.h>".to_string(),
        "#include <stddef.h>".to_string(),
        String::new(),
        "typedef struct { uint32_t start; uint32_t end; } UnicodeRange;".to_string(),
        String::new(),
    ];

    for table in tables {
        let name = table.property.to_lowercase();
        lines.push("// Generated from Unicode DerivedCoreProperties.txt".to_string());
        lines.push(format!("// Property: {}", table.property));
        lines.push(format!("static const UnicodeRange {name}_ranges[] = {{"));
        for range in &table.ranges {
            lines.push(format!(
                "    {{{}, {}}},{}",
                hex(range.start),
                hex(range.end),
                annotation(range)
            ));
        }
        lines.push("};".to_string());
        lines.push(format!("static const size_t {name}_count = {};", table.len()));
        lines.push(String::new());
    }

    lines.join("\n") + "\n"
}

pub fn render_rust(origin: &str, tables: &[PropertyTable]) -> String {
    let mut lines = vec![format!("// Source: {origin}")];

    for table in tables {
        let name = table.property.to_uppercase();
        lines.push(String::new());
        lines.push("// Generated from Unicode DerivedCoreProperties.txt".to_string());
        lines.push(format!("// Property: {}", table.property));
        lines.push(format!(
            "pub static {name}: [(u32, u32); {}] = [",
            table.len()
        ));
        for range in &table.ranges {
            lines.push(format!(
                "    ({}, {}),{}",
                hex(range.start),
                hex(range.end),
                annotation(range)
            ));
        }
        lines.push("];".to_string());
    }

    lines.join("\n") + "\n"
}

pub fn render_json(origin: &str, tables: &[PropertyTable]) -> Result<String> {
    let document = TableDocument {
        origin: origin.to_string(),
        tables: tables.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn render_csv(tables: &[PropertyTable]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for table in tables {
        for range in &table.ranges {
            writer.serialize(CsvRow {
                property: &table.property,
                start: format!("{:04X}", range.start),
                end: format!("{:04X}", range.end),
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EtlError::ValidationError {
        message: format!("CSV output is not UTF-8: {e}"),
    })
}
