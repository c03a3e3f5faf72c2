use std::path::PathBuf;

use clap::Args;
use tabstat_stats::boxplot::BoxPlot;

use crate::{
    command::{self, InputArg},
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct BoxplotArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Output JSON file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BoxplotArg) -> anyhow::Result<()> {
    let dataset = arg.input.load()?;
    let columns = dataset.select(&arg.input.columns)?;
    let boxplots = command::analyze_columns("boxplot", columns, |values| BoxPlot::new(values));
    for (column, boxplot) in boxplots.iter().map(|b| (&b.column, &b.result)) {
        if !boxplot.outliers.is_empty() {
            tracing::info!(%column, outliers = boxplot.outliers.len(), "found outliers");
        }
    }
    Output::from_output_path(arg.output.clone())?.write_json(&boxplots)
}
