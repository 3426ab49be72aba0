//! Tabular input: a header row plus typed cells.

use std::{collections::HashSet, fmt::Display, path::Path};

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{Error, Result};

/// Columns of the custom model spreadsheet.
pub const EXPECTED_HEADERS: [&str; 11] = [
    "Verbose Name",
    "Type",
    "Minecraft Item",
    "Parent",
    "Textures",
    "Custom Model Data",
    "Location",
    "Link to BBMODEL",
    "Link to JSON",
    "Link to texture folder",
    "Give Command",
];

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Empty cell (or whitespace only text).
    #[default]
    Empty,
    /// Trimmed text.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating point value. Spreadsheets usually store numbers this way.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Create a text cell, mapping blank text to [`Cell::Empty`].
    pub fn text(value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }

    /// Whether the cell holds no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Cell content as text, `None` for empty cells.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }

    /// Cell content as an integer.
    ///
    /// Floats are accepted when they have no fractional part, text when it
    /// parses as an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                Some(*value as i64)
            }
            Self::Text(value) => value.parse().ok(),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Self::Empty,
            Data::String(text) => Self::text(text),
            Data::Int(value) => Self::Int(*value),
            Data::Float(value) => Self::Float(*value),
            Data::Bool(value) => Self::Bool(*value),
            other => Self::text(other.to_string()),
        }
    }
}

/// A loaded table: a header row and the data rows below it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table from a header row and data rows.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Load the first worksheet of a workbook. The first row is the header.
    ///
    /// # Errors
    /// - If the workbook cannot be opened or parsed
    /// - If the workbook has no worksheet or the worksheet has no rows
    #[tracing::instrument(level = "debug")]
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::EmptyWorkbook(path.to_path_buf()))??;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .ok_or_else(|| Error::EmptyWorkbook(path.to_path_buf()))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        let rows = rows
            .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());

        Ok(Self::new(headers, rows))
    }

    /// Check the header row against `expected` and iterate the data rows with
    /// their cells reordered to match `expected`.
    ///
    /// The header row must contain exactly the expected names, in any order.
    ///
    /// # Errors
    /// - If a column is missing, unexpected or duplicated
    pub fn records<'a>(
        &'a self,
        expected: &'a [&str],
    ) -> Result<impl Iterator<Item = Record> + 'a> {
        let mut seen = HashSet::new();
        let unexpected = self
            .headers
            .iter()
            .filter(|header| {
                !expected.contains(&header.as_str()) || !seen.insert(header.as_str())
            })
            .cloned()
            .collect::<Vec<_>>();
        let missing = expected
            .iter()
            .filter(|column| !self.headers.iter().any(|header| header == *column))
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(Error::Schema {
                missing,
                unexpected,
            });
        }

        let positions = expected
            .iter()
            .filter_map(|column| self.headers.iter().position(|header| header == column))
            .collect::<Vec<_>>();

        Ok(self.rows.iter().enumerate().map(move |(index, row)| {
            Record {
                // header occupies row 1
                row: index + 2,
                cells: positions
                    .iter()
                    .map(|&position| row.get(position).cloned().unwrap_or_default())
                    .collect(),
            }
        }))
    }
}

/// A data row aligned to the expected column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    row: usize,
    cells: Vec<Cell>,
}

impl Record {
    /// Spreadsheet row number, 1-based with the header as row 1.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Cell at the position of the column in the expected column list.
    #[must_use]
    pub fn cell(&self, index: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.cells.get(index).unwrap_or(EMPTY)
    }

    /// All cells in expected column order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether every cell of the row is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}
