//! Range extraction from `HEX[..HEX] ; Property # comment` property tables.

use crate::domain::model::{CodePoint, Range};
use crate::utils::error::{EtlError, Result};

const COMMENT_DELIMITER: char = '#';
const FIELD_DELIMITER: char = ';';
const RANGE_OPERATOR: &str = "..";

/// Collects one range per record whose property field is exactly `property`.
///
/// Records come back in file order with no sorting or merging. Lines that are
/// not records for `property` (blank lines, comments, other properties) are
/// skipped. A matching record whose code point field is not valid hex is an
/// error.
pub fn extract_ranges(text: &str, property: &str) -> Result<Vec<Range>> {
    let mut ranges = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let data = strip_comment(line);

        let Some((code_points, rest)) = data.split_once(FIELD_DELIMITER) else {
            continue;
        };

        if !property_matches(rest, property) {
            continue;
        }

        let range = parse_code_points(code_points.trim()).map_err(|reason| {
            EtlError::ParseError {
                line: index + 1,
                content: line.to_string(),
                reason,
            }
        })?;

        ranges.push(range);
    }

    tracing::debug!(property, records = ranges.len(), "extracted raw ranges");
    Ok(ranges)
}

fn strip_comment(line: &str) -> &str {
    match line.split_once(COMMENT_DELIMITER) {
        Some((data, _comment)) => data.trim(),
        None => line.trim(),
    }
}

/// The property is the first token of the field after the code points; any
/// further fields (`InCB; Linker`) are ignored.
fn property_matches(fields: &str, property: &str) -> bool {
    fields
        .split(FIELD_DELIMITER)
        .next()
        .and_then(|field| field.split_whitespace().next())
        .is_some_and(|name| name == property)
}

fn parse_code_points(field: &str) -> std::result::Result<Range, String> {
    let (start, end) = match field.split_once(RANGE_OPERATOR) {
        Some((start, end)) => (parse_hex(start.trim())?, parse_hex(end.trim())?),
        None => {
            let code_point = parse_hex(field)?;
            (code_point, code_point)
        }
    };

    if start > end {
        return Err(format!("range start {start:04X} is after range end {end:04X}"));
    }

    Ok(Range::new(start, end))
}

fn parse_hex(digits: &str) -> std::result::Result<CodePoint, String> {
    if digits.is_empty() {
        return Err("missing code point".to_string());
    }
    // from_str_radix tolerates a leading '+', the file format does not
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{digits}' is not a hexadecimal code point"));
    }

    CodePoint::from_str_radix(digits, 16).map_err(|e| format!("'{digits}': {e}"))
}
