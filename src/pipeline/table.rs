//! In-memory tabular data shared by both pipelines.
//!
//! Every cell goes through [`clean_cell`] when it enters a [`Table`], so the
//! rest of the code only ever sees one representation of "no value": the
//! empty string.

use crate::error::{RegistryError, Result};
use std::collections::HashSet;

/// Textual placeholders spreadsheet exports use for missing numbers.
const MISSING_PLACEHOLDERS: [&str; 2] = ["nan", "NaN"];

/// Maps missing-value placeholders to the empty string; everything else is
/// kept verbatim.
pub fn clean_cell(raw: &str) -> String {
    if MISSING_PLACEHOLDERS.contains(&raw) {
        String::new()
    } else {
        raw.to_string()
    }
}

/// True for the empty string and for the missing-value placeholders.
pub fn is_missing(value: &str) -> bool {
    value.is_empty() || MISSING_PLACEHOLDERS.contains(&value)
}

/// A named table with a header row and string cells, in source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Convenience constructor used by adapters and tests.
    pub fn from_rows<H, R, C>(name: impl Into<String>, headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Self::new(name, headers.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row.into_iter().map(Into::into).collect());
        }
        table
    }

    /// Appends a row, cleaning each cell. Short rows are padded with empty
    /// cells and surplus cells beyond the header width are dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let width = self.headers.len();
        let mut row: Vec<String> = cells.iter().take(width).map(|c| clean_cell(c)).collect();
        row.resize(width, String::new());
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact header.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn require_column(&self, header: &str) -> Result<usize> {
        self.column(header).ok_or_else(|| RegistryError::MissingColumn {
            column: header.to_string(),
            table: self.name.clone(),
        })
    }

    /// Fails on the first header in `headers` that the table lacks.
    pub fn require_columns(&self, headers: &[&str]) -> Result<()> {
        for header in headers {
            self.require_column(header)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    /// Keeps only the first row for each key, preserving row order.
    pub fn dedup_first_by<F>(&self, key: F) -> Table
    where
        F: Fn(&Row<'_>) -> String,
    {
        let mut seen = HashSet::new();
        let rows = self
            .rows()
            .filter(|row| seen.insert(key(row)))
            .map(|row| row.cells.to_vec())
            .collect();

        Table {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }
}

/// Borrowed view of one table row with lookup by header.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell under `header`, or `""` when the table has no such column.
    pub fn get(&self, header: &str) -> &'a str {
        self.table
            .column(header)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}
