use std::{io::Write as _, path::PathBuf};

use clap::Args;
use tabstat_stats::correlation;

use crate::{
    command::InputArg,
    dataset::Column,
    util::{Output, format_value},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CorrelateArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// First column; every pair of selected columns is correlated when omitted
    #[arg(long, requires = "y")]
    pub x: Option<String>,

    /// Second column
    #[arg(long, requires = "x")]
    pub y: Option<String>,

    /// Write JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct PairCorrelation {
    x: String,
    y: String,
    correlation: f64,
    covariance: f64,
}

pub(crate) fn run(arg: &CorrelateArg) -> anyhow::Result<()> {
    let dataset = arg.input.load()?;
    let pairs = match (&arg.x, &arg.y) {
        (Some(x), Some(y)) => vec![(dataset.column(x)?, dataset.column(y)?)],
        _ => all_pairs(&dataset.select(&arg.input.columns)?),
    };
    let results = pairs
        .into_iter()
        .filter_map(|(x, y)| match correlate(x, y) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!(x = %x.name, y = %y.name, error = %err, "correlation skipped");
                None
            }
        })
        .collect::<Vec<_>>();

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        return output.write_json(&results);
    }
    for result in &results {
        writeln!(
            output,
            "{} ~ {}: r = {}, cov = {}",
            result.x,
            result.y,
            format_value(result.correlation),
            format_value(result.covariance),
        )?;
    }
    output.finish()
}

fn correlate(x: &Column, y: &Column) -> tabstat_stats::StatsResult<PairCorrelation> {
    Ok(PairCorrelation {
        x: x.name.clone(),
        y: y.name.clone(),
        correlation: correlation::correlation(&x.values, &y.values)?,
        covariance: correlation::covariance(&x.values, &y.values)?,
    })
}

/// Unordered pairs of distinct columns, in selection order.
fn all_pairs<'a>(columns: &[&'a Column]) -> Vec<(&'a Column, &'a Column)> {
    columns
        .iter()
        .enumerate()
        .flat_map(|(i, &x)| columns[i + 1..].iter().map(move |&y| (x, y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::dataset::Dataset;

    use super::*;

    const DATA: &str = "a,b,c,d\n1,2,5,3\n2,1,4,3\n3,4,3,3\n4,3,2,3\n5,5,1,3\n";

    #[test]
    fn test_all_pairs() {
        let dataset = Dataset::from_reader(DATA.as_bytes(), b',').unwrap();
        let columns = dataset.select(&[]).unwrap();
        let names = all_pairs(&columns)
            .into_iter()
            .map(|(x, y)| format!("{}{}", x.name, y.name))
            .collect::<Vec<_>>();
        assert_eq!(names, ["ab", "ac", "ad", "bc", "bd", "cd"]);
    }

    #[test]
    fn test_correlate() {
        let dataset = Dataset::from_reader(DATA.as_bytes(), b',').unwrap();
        let a = dataset.column("a").unwrap();

        let ab = correlate(a, dataset.column("b").unwrap()).unwrap();
        assert!((ab.correlation - 0.8).abs() < 1e-12);

        let ac = correlate(a, dataset.column("c").unwrap()).unwrap();
        assert_eq!(ac.correlation, -1.0);

        // constant column
        assert!(correlate(a, dataset.column("d").unwrap()).is_err());
    }
}
