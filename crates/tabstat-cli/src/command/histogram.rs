use std::path::PathBuf;

use clap::Args;
use tabstat_stats::histogram::{DEFAULT_BIN_COUNT, Histogram, HistogramMode};

use crate::{
    command::{self, InputArg},
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Number of equal-width bins
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    pub bins: usize,

    /// Report raw counts instead of densities normalized to unit area
    #[arg(long)]
    pub raw: bool,

    /// Output JSON file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl HistogramArg {
    fn mode(&self) -> HistogramMode {
        if self.raw {
            HistogramMode::Raw
        } else {
            HistogramMode::Normalized
        }
    }
}

pub(crate) fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    if arg.bins == 0 {
        anyhow::bail!("--bins must be at least 1");
    }
    let dataset = arg.input.load()?;
    let columns = dataset.select(&arg.input.columns)?;
    let mode = arg.mode();
    let histograms = command::analyze_columns("histogram", columns, |values| {
        Histogram::new(values, arg.bins, mode)
    });
    tracing::debug!(columns = histograms.len(), bins = arg.bins, ?mode, "computed histograms");

    Output::from_output_path(arg.output.clone())?.write_json(&histograms)
}
