use std::{io::Write as _, path::PathBuf};

use clap::Args;
use tabstat_stats::matrix::{self, Matrix};

use crate::{
    command::delimiter_byte,
    dataset,
    util::{Output, format_value},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct MatrixArg {
    /// Path to a header-less CSV with one matrix row per line
    pub path: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Write JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct MatrixReport {
    rows: usize,
    cols: usize,
    transpose: Vec<Vec<f64>>,
    determinant: Option<f64>,
    inverse: Option<Vec<Vec<f64>>>,
    /// Why the inverse is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl MatrixReport {
    fn new(m: &Matrix) -> Self {
        let determinant = matrix::determinant(m).ok();
        let (inverse, note) = match matrix::inverse(m) {
            Ok(inv) => (Some(matrix::to_rows(&inv)), None),
            Err(err) => {
                tracing::info!(error = %err, "matrix has no inverse");
                (None, Some(err.to_string()))
            }
        };
        Self {
            rows: m.nrows(),
            cols: m.ncols(),
            transpose: matrix::to_rows(&matrix::transpose(m)),
            determinant,
            inverse,
            note,
        }
    }
}

pub(crate) fn run(arg: &MatrixArg) -> anyhow::Result<()> {
    let rows = dataset::read_rows(&arg.path, delimiter_byte(arg.delimiter)?)?;
    anyhow::ensure!(!rows.is_empty(), "No rows in {}", arg.path.display());
    let m = matrix::from_rows(&rows)?;
    let report = MatrixReport::new(&m);

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        return output.write_json(&report);
    }
    writeln!(output, "Matrix ({}x{})", report.rows, report.cols)?;
    writeln!(output, "Transpose:")?;
    write_rows(&mut output, &report.transpose)?;
    match report.determinant {
        Some(det) => writeln!(output, "Determinant: {}", format_value(det))?,
        None => writeln!(output, "Determinant: undefined")?,
    }
    match (&report.inverse, &report.note) {
        (Some(inverse), _) => {
            writeln!(output, "Inverse:")?;
            write_rows(&mut output, inverse)?;
        }
        (None, note) => {
            let note = note.as_deref().unwrap_or("undefined");
            writeln!(output, "Inverse: {note}")?;
        }
    }
    output.finish()
}

fn write_rows<W>(writer: &mut W, rows: &[Vec<f64>]) -> std::io::Result<()>
where
    W: std::io::Write,
{
    for row in rows {
        let cells = row.iter().map(|v| format!("{:>12}", format_value(*v)));
        writeln!(writer, "  {}", cells.collect::<Vec<_>>().join(" "))?;
    }
    Ok(())
}
