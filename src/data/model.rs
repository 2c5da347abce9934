use std::collections::BTreeMap;
use std::fmt;

use crate::error::EdaError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// Tokens read as a missing value when parsing text cells.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#NA",
];

/// A dynamically-typed cell mirroring the dtypes a processed CSV carries.
/// Categorical counts key a `BTreeMap` on it, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can key ordered maps on CellValue --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Type a raw text cell: missing marker, integer, float, bool, then string.
    ///
    /// Only an exact marker is null; whitespace around a number or bool is
    /// ignored, but a blank cell of spaces stays a string.
    pub fn parse(raw: &str) -> Self {
        if MISSING_MARKERS.contains(&raw) {
            return CellValue::Null;
        }
        let s = raw.trim();
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Try to interpret the value as an `f64` for numeric analysis.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded table
// ---------------------------------------------------------------------------

/// Rows of cells under an ordered header. Every row has one cell per column.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names in header order.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header.
    pub fn column_index(&self, name: &str) -> Result<usize, EdaError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EdaError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// All cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &CellValue> + '_, EdaError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// A numeric column as `f64`s with `None` for missing cells.
    ///
    /// Any non-numeric, non-null cell is an error, and so is `inf` or `-inf`:
    /// plots and correlations need a bounded range.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, EdaError> {
        self.column(name)?
            .enumerate()
            .map(|(row, cell)| match cell {
                CellValue::Null => Ok(None),
                other => match other.as_f64() {
                    Some(v) if v.is_finite() => Ok(Some(v)),
                    Some(_) => Err(EdaError::NonFinite {
                        column: name.to_string(),
                        row,
                        value: other.to_string(),
                    }),
                    None => Err(EdaError::NonNumeric {
                        column: name.to_string(),
                        row,
                        value: other.to_string(),
                    }),
                },
            })
            .collect()
    }

    /// Occurrence count of each non-null value of a column.
    pub fn value_counts(&self, name: &str) -> Result<BTreeMap<CellValue, usize>, EdaError> {
        let mut counts = BTreeMap::new();
        for cell in self.column(name)?.filter(|c| !c.is_null()) {
            *counts.entry(cell.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
