//! Nested-brace matrix format used at the facade edge.
//!
//! The textual form is `{{a,b,c},{d,e,f}}`: rows wrapped in braces, values
//! comma-separated. All whitespace (including newlines) is stripped before
//! parsing, and rows are split on the literal `},{`. Internally everything is
//! a typed matrix; this format only appears where matrices enter or leave the
//! process.

use ndarray::Array2;

use crate::error::PartitionError;
use crate::model::Partition;

fn invalid(msg: impl Into<String>) -> PartitionError {
    PartitionError::InvalidInput(msg.into())
}

/// Parse a brace-formatted real matrix.
///
/// # Errors
///
/// `InvalidInput` if the braces do not wrap the text, a value does not parse
/// as a real, or rows have differing lengths.
pub fn parse_matrix(input: &str) -> Result<Array2<f64>, PartitionError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = compact
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .ok_or_else(|| invalid("matrix text must be wrapped in {{...}}"))?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for row_text in inner.split("},{") {
        let row: Vec<f64> = row_text
            .split(',')
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| invalid(format!("not a real number: '{token}'")))
            })
            .collect::<Result<_, _>>()?;
        rows.push(row);
    }

    let height = rows.len();
    let width = rows[0].len();
    if rows.iter().any(|r| r.len() != width) {
        return Err(invalid("rows have differing lengths"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((height, width), flat)
        .map_err(|e| invalid(format!("matrix shape error: {e}")))
}

/// Serialize a matrix to the brace format, one row per `{...}` group.
pub fn format_matrix(m: &Array2<f64>) -> String {
    let rows: Vec<String> = m
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    format!("{{{{{}}}}}", rows.join("},{"))
}

/// Serialize a partition as variable-length groups, `{{v,v,…},{v,…},…}`,
/// without padding.
pub fn format_groups(partition: &Partition) -> String {
    let rows: Vec<String> = partition
        .groups()
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    format!("{{{{{}}}}}", rows.join("},{"))
}
