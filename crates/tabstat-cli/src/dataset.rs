//! CSV loading and typed column extraction.
//!
//! A column is numeric when every field in it parses as `f64`; all other
//! columns (labels such as a species name, or columns with blank fields) are
//! skipped and recorded in [`Dataset::skipped`].

use std::{fs::File, io, path::Path};

use anyhow::Context;
use tabstat_stats::NumericSeries;

/// One numeric column of a dataset.
#[derive(Debug, Clone)]
pub(crate) struct Column {
    pub name: String,
    pub values: NumericSeries,
}

/// The numeric columns of a CSV table, in header order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Dataset {
    columns: Vec<Column>,
    skipped: Vec<String>,
    row_count: usize,
}

impl Dataset {
    pub fn open<P>(path: P, delimiter: u8) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
        Self::from_reader(io::BufReader::new(file), delimiter)
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))
    }

    pub fn from_reader<R>(reader: R, delimiter: u8) -> anyhow::Result<Self>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        // None once a field in the column fails to parse
        let mut parsed: Vec<Option<Vec<f64>>> = vec![Some(vec![]); headers.len()];
        let mut row_count = 0;
        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", row + 2))?;
            for (field, column) in record.iter().zip(&mut parsed) {
                if let Some(values) = column {
                    match field.parse::<f64>() {
                        Ok(value) => values.push(value),
                        Err(_) => *column = None,
                    }
                }
            }
            row_count += 1;
        }

        let mut columns = vec![];
        let mut skipped = vec![];
        for (name, values) in headers.into_iter().zip(parsed) {
            match values {
                Some(values) => columns.push(Column {
                    name,
                    values: NumericSeries::new(values),
                }),
                None => {
                    tracing::info!(column = %name, "skipping non-numeric column");
                    skipped.push(name);
                }
            }
        }
        tracing::debug!(
            rows = row_count,
            numeric = columns.len(),
            skipped = skipped.len(),
            "loaded dataset"
        );

        Ok(Self {
            columns,
            skipped,
            row_count,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Names of columns that were not numeric.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> anyhow::Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                if self.skipped.iter().any(|s| s == name) {
                    anyhow::anyhow!("Column {name} is not numeric")
                } else {
                    anyhow::anyhow!("Column {name} not found")
                }
            })
    }

    /// Looks up `names`, or returns every numeric column when `names` is empty.
    pub fn select(&self, names: &[String]) -> anyhow::Result<Vec<&Column>> {
        if names.is_empty() {
            return Ok(self.columns.iter().collect());
        }
        names.iter().map(|name| self.column(name)).collect()
    }
}

/// Reads a header-less CSV of numbers as rows, e.g. for matrix input.
///
/// Rows may differ in length; shape validation is left to the caller.
pub(crate) fn read_rows<P>(path: P, delimiter: u8) -> anyhow::Result<Vec<Vec<f64>>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    rows_from_reader(io::BufReader::new(file), delimiter)
        .with_context(|| format!("Failed to read numeric rows from {}", path.display()))
}

fn rows_from_reader<R>(reader: R, delimiter: u8) -> anyhow::Result<Vec<Vec<f64>>>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .records()
        .enumerate()
        .map(|(row, record)| -> anyhow::Result<Vec<f64>> {
            let record = record.with_context(|| format!("Failed to read row {}", row + 1))?;
            record
                .iter()
                .map(|field| {
                    field.parse::<f64>().with_context(|| {
                        format!("Invalid number {field:?} in row {}", row + 1)
                    })
                })
                .collect()
        })
        .collect()
}
