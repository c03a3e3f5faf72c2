use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tabstat_stats::{NumericSeries, StatsError, StatsResult};
use tracing_subscriber::EnvFilter;

use crate::dataset::{Column, Dataset};

use self::{
    boxplot::BoxplotArg, chi_square::ChiSquareArg, correlate::CorrelateArg,
    describe::DescribeArg, histogram::HistogramArg, matrix::MatrixArg,
};

mod boxplot;
mod chi_square;
mod correlate;
mod describe;
mod histogram;
mod matrix;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "tabstat=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print descriptive statistics for each numeric column
    Describe(#[clap(flatten)] DescribeArg),
    /// Compute equal-width histograms for each numeric column
    Histogram(#[clap(flatten)] HistogramArg),
    /// Compute boxplot summaries for each numeric column
    Boxplot(#[clap(flatten)] BoxplotArg),
    /// Compute Pearson correlation between columns
    Correlate(#[clap(flatten)] CorrelateArg),
    /// Run a chi-square goodness-of-fit test on category counts
    ChiSquare(#[clap(flatten)] ChiSquareArg),
    /// Transpose, determinant, and inverse of a matrix read from CSV
    Matrix(#[clap(flatten)] MatrixArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(&args.log_level)?;
    match &args.mode {
        Mode::Describe(arg) => describe::run(arg)?,
        Mode::Histogram(arg) => histogram::run(arg)?,
        Mode::Boxplot(arg) => boxplot::run(arg)?,
        Mode::Correlate(arg) => correlate::run(arg)?,
        Mode::ChiSquare(arg) => chi_square::run(arg)?,
        Mode::Matrix(arg) => matrix::run(arg)?,
    }
    Ok(())
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter: {default_filter}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Dataset input shared by the column-oriented commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Path to the CSV file; the first row holds column names
    pub path: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Columns to analyze (comma-separated); all numeric columns when omitted
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl InputArg {
    pub fn load(&self) -> anyhow::Result<Dataset> {
        Dataset::open(&self.path, delimiter_byte(self.delimiter)?)
    }
}

pub(crate) fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow::anyhow!("Delimiter must be a single ASCII character: {delimiter:?}"))
}

/// A per-column result, serialized with the column name alongside the result's fields.
#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct ColumnOutput<T> {
    pub column: String,
    #[serde(flatten)]
    pub result: T,
}

/// Applies `analysis` to each column independently.
///
/// A failing column is logged, reported on stderr, and left out of the
/// result; the remaining columns are still analyzed.
pub(crate) fn analyze_columns<'a, T, I, F>(
    statistic: &str,
    columns: I,
    analysis: F,
) -> Vec<ColumnOutput<T>>
where
    I: IntoIterator<Item = &'a Column>,
    F: Fn(&NumericSeries) -> StatsResult<T>,
{
    columns
        .into_iter()
        .filter_map(|column| match analysis(&column.values) {
            Ok(result) => Some(ColumnOutput {
                column: column.name.clone(),
                result,
            }),
            Err(err) => {
                tracing::warn!(statistic, column = %column.name, error = %err, "analysis skipped");
                eprintln!("{}", skip_message(statistic, &column.name, &err));
                None
            }
        })
        .collect()
}

fn skip_message(statistic: &str, column: &str, err: &StatsError) -> String {
    format!("Skipping {statistic} for column {column}: {err}")
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use tabstat_stats::central;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_describe() {
        let args = CommandArgs::try_parse_from([
            "tabstat",
            "describe",
            "iris.csv",
            "--columns",
            "sepal_length,petal_length",
            "--json",
        ])
        .unwrap();
        let Mode::Describe(arg) = args.mode else {
            panic!("expected describe");
        };
        assert_eq!(arg.input.columns, ["sepal_length", "petal_length"]);
        assert_eq!(arg.input.delimiter, ',');
        assert!(arg.json);
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }

    #[test]
    fn test_analyze_columns_skips_failures() {
        let dataset = Dataset::from_reader("a,b\n1,x\n2,y\n".as_bytes(), b',').unwrap();
        let empty = Dataset::from_reader("c\n".as_bytes(), b',').unwrap();
        let columns = dataset.columns().iter().chain(empty.columns());

        let outputs = analyze_columns("mean", columns, |values| central::mean(values));
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].column, "a");
        assert!((outputs[0].result - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_skip_message() {
        let err = central::mean(&[]).unwrap_err();
        let message = skip_message("mean", "petal_width", &err);
        assert!(message.starts_with("Skipping mean for column petal_width: "));
        assert!(message.ends_with(&err.to_string()));
    }

    #[test]
    fn test_column_output_flattens_result() {
        #[derive(serde::Serialize)]
        struct Pair {
            x: u32,
        }
        let output = ColumnOutput {
            column: "a".to_owned(),
            result: Pair { x: 1 },
        };
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"column":"a","x":1}"#
        );
    }
}
