//! Descriptive statistics command
//!
//! Prints count, central tendency, quartiles, and dispersion for every
//! numeric column, plus any extra quantiles requested, as a text table or as
//! JSON.

use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::Args;
use tabstat_stats::{StatsResult, descriptive::DescriptiveStats, quantile::Quantiles};

use crate::{
    command::{self, ColumnOutput, InputArg},
    util::{Output, format_value},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Extra quantile probabilities to report (comma-separated, e.g. 0.1,0.9)
    #[arg(long, value_delimiter = ',')]
    pub quantiles: Vec<f64>,

    /// Write JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Summary of one column plus any requested extra quantiles.
#[derive(Debug, Clone, serde::Serialize)]
struct ColumnSummary {
    #[serde(flatten)]
    stats: DescriptiveStats,
    #[serde(skip_serializing_if = "Quantiles::is_empty")]
    quantiles: Quantiles,
}

impl ColumnSummary {
    fn new(values: &[f64], points: &[f64]) -> StatsResult<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(Self {
            stats: DescriptiveStats::from_sorted(&sorted)?,
            quantiles: Quantiles::from_sorted(&sorted, points)?,
        })
    }
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    if let Some(p) = arg.quantiles.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        anyhow::bail!("--quantiles must be within [0, 1], got {p}");
    }
    let dataset = arg.input.load()?;
    let columns = dataset.select(&arg.input.columns)?;
    let reports = command::analyze_columns("describe", columns, |values| {
        ColumnSummary::new(values, &arg.quantiles)
    });

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        return output.write_json(&reports);
    }

    writeln!(output, "Summary Statistics ({} rows)", dataset.row_count())?;
    if !dataset.skipped().is_empty() {
        writeln!(output, "Skipped non-numeric: {}", dataset.skipped().join(", "))?;
    }
    writeln!(output)?;
    write_table(&mut output, &row_labels(&arg.quantiles), &reports)
        .with_context(|| format!("Failed to write table to {}", output.display_path()))?;
    output.finish()
}

const ROW_LABELS: [&str; 12] = [
    "count", "mean", "mode", "mode count", "min", "25%", "median", "75%", "max", "range",
    "variance", "std dev",
];

fn row_labels(points: &[f64]) -> Vec<String> {
    ROW_LABELS
        .iter()
        .map(|label| (*label).to_owned())
        .chain(points.iter().map(|p| format!("q({p})")))
        .collect()
}

fn row_values(summary: &ColumnSummary) -> Vec<String> {
    let stats = &summary.stats;
    [
        stats.count.to_string(),
        format_value(stats.mean),
        format_value(stats.mode.value),
        stats.mode.count.to_string(),
        format_value(stats.min),
        format_value(stats.q1),
        format_value(stats.median),
        format_value(stats.q3),
        format_value(stats.max),
        format_value(stats.range),
        format_value(stats.variance),
        format_value(stats.std_dev),
    ]
    .into_iter()
    .chain(summary.quantiles.iter().map(|(_, value)| format_value(value)))
    .collect()
}

/// Writes one row per statistic and one column per dataset column.
fn write_table<W>(
    writer: &mut W,
    labels: &[String],
    reports: &[ColumnOutput<ColumnSummary>],
) -> std::io::Result<()>
where
    W: std::io::Write,
{
    let widths = reports
        .iter()
        .map(|report| report.column.len().max(12))
        .collect::<Vec<_>>();

    write!(writer, "  {:<12}", "")?;
    for (report, width) in reports.iter().zip(&widths) {
        write!(writer, " {:>width$}", report.column)?;
    }
    writeln!(writer)?;
    let total_width = 12 + widths.iter().map(|w| w + 1).sum::<usize>();
    writeln!(writer, "  {}", "-".repeat(total_width))?;

    let values = reports
        .iter()
        .map(|report| row_values(&report.result))
        .collect::<Vec<_>>();
    for (row, label) in labels.iter().enumerate() {
        write!(writer, "  {label:<12}")?;
        for (column_values, width) in values.iter().zip(&widths) {
            write!(writer, " {:>width$}", column_values[row])?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
