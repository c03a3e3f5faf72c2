use std::{io::Write as _, path::PathBuf};

use clap::Args;
use tabstat_stats::chi_square::{self, ChiSquareResult};

use crate::util::{Output, format_value};

#[derive(Debug, Clone, Args)]
pub(crate) struct ChiSquareArg {
    /// Observed counts per category (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub observed: Vec<f64>,

    /// Expected counts per category (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        conflicts_with = "proportions",
        required_unless_present = "proportions"
    )]
    pub expected: Vec<f64>,

    /// Expected proportions per category; scaled by the observed total
    #[arg(long, value_delimiter = ',')]
    pub proportions: Vec<f64>,

    /// Significance level for the reject/accept verdict
    #[arg(long, default_value_t = 0.05)]
    pub alpha: f64,

    /// Write JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct ChiSquareReport {
    observed: Vec<f64>,
    expected: Vec<f64>,
    #[serde(flatten)]
    result: ChiSquareResult,
    alpha: f64,
    rejected: bool,
}

impl ChiSquareArg {
    fn expected_counts(&self) -> anyhow::Result<Vec<f64>> {
        if self.proportions.is_empty() {
            return Ok(self.expected.clone());
        }
        let total = self.observed.iter().sum::<f64>();
        Ok(chi_square::expected_counts(total, &self.proportions)?)
    }
}

pub(crate) fn run(arg: &ChiSquareArg) -> anyhow::Result<()> {
    if !(arg.alpha > 0.0 && arg.alpha < 1.0) {
        anyhow::bail!("--alpha must be in (0, 1), got {}", arg.alpha);
    }
    let report = evaluate(arg)?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        return output.write_json(&report);
    }
    let ChiSquareReport { result, .. } = &report;
    writeln!(output, "chi-square = {}", format_value(result.statistic))?;
    writeln!(output, "degrees of freedom = {}", result.degrees_of_freedom)?;
    writeln!(output, "p-value = {:.6e}", result.p_value)?;
    let verdict = if report.rejected { "rejected" } else { "not rejected" };
    writeln!(output, "null hypothesis {verdict} at alpha = {}", report.alpha)?;
    output.finish()
}

fn evaluate(arg: &ChiSquareArg) -> anyhow::Result<ChiSquareReport> {
    let expected = arg.expected_counts()?;
    let result = chi_square::goodness_of_fit(&arg.observed, &expected)?;
    tracing::debug!(?result, "goodness-of-fit test");
    Ok(ChiSquareReport {
        observed: arg.observed.clone(),
        expected,
        result,
        alpha: arg.alpha,
        rejected: result.rejects_at(arg.alpha),
    })
}
