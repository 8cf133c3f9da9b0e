use crate::utils::error::{HomeScoreError, Result};
use serde_json::Value;

/// Census response body: a JSON array whose first row names the columns and
/// whose remaining rows are data.
///
/// Cells are kept as optional strings; numbers are stringified and `null`
/// becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn parse(endpoint: &str, body: &Value) -> Result<Self> {
        let mut rows = body
            .as_array()
            .ok_or_else(|| HomeScoreError::format(endpoint, "response is not a JSON array"))?
            .iter()
            .enumerate()
            .map(|(i, row)| parse_row(endpoint, i, row));

        let header = rows
            .next()
            .ok_or_else(|| HomeScoreError::format(endpoint, "response has no header row"))??
            .into_iter()
            .map(|cell| cell.unwrap_or_default())
            .collect::<Vec<_>>();

        let rows = rows.collect::<Result<Vec<_>>>()?;

        if let Some(i) = rows.iter().position(|row| row.len() != header.len()) {
            return Err(HomeScoreError::format(
                endpoint,
                format!(
                    "row {} has {} cells but the header has {}",
                    i + 1,
                    rows[i].len(),
                    header.len()
                ),
            ));
        }

        Ok(Self { header, rows })
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, endpoint: &str, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| HomeScoreError::format(endpoint, format!("missing column '{}'", name)))
    }
}

fn parse_row(endpoint: &str, index: usize, row: &Value) -> Result<Vec<Option<String>>> {
    row.as_array()
        .ok_or_else(|| HomeScoreError::format(endpoint, format!("row {} is not an array", index)))?
        .iter()
        .map(|cell| match cell {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(HomeScoreError::format(
                endpoint,
                format!("row {} has a non-scalar cell: {}", index, other),
            )),
        })
        .collect()
}
