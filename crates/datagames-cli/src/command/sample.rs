use std::path::PathBuf;

use datagames_engine::{DistributionCatalog, Seed, sample_count};
use datagames_stats::{descriptive::DescriptiveStats, histogram::DensityHistogram};
use serde::Serialize;

use crate::{command::GlobalArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    /// Family key (1-5)
    #[clap(long)]
    family: u8,
    /// Number of samples to draw
    #[clap(long, default_value_t = sample_count::DEFAULT)]
    count: usize,
    /// Number of histogram bins
    #[clap(long, default_value_t = 100)]
    bins: usize,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SampleReport {
    seed: Seed,
    family: u8,
    name: &'static str,
    requested_count: usize,
    values: Vec<f64>,
    stats: Option<StatsReport>,
    histogram: Vec<BinReport>,
    density: Vec<(f64, f64)>,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    count: usize,
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    std_dev: f64,
}

impl From<DescriptiveStats> for StatsReport {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
        }
    }
}

#[derive(Debug, Serialize)]
struct BinReport {
    start: f64,
    end: f64,
    count: u64,
    density: f64,
}

pub(crate) fn run(global: &GlobalArgs, arg: &SampleArg) -> anyhow::Result<()> {
    let SampleArg {
        family,
        count,
        bins,
        output,
    } = arg;

    let seed = global.sample_seed();
    let report = build_report(seed, *family, *count, *bins)?;
    eprintln!(
        "Drew {} of {} requested {} samples",
        report.values.len(),
        count,
        report.name
    );
    Output::save_json(&report, output.clone())
}

fn build_report(seed: Seed, key: u8, count: usize, bins: usize) -> anyhow::Result<SampleReport> {
    let mut catalog = DistributionCatalog::new(seed);
    let samples = catalog.sample(key, count)?;
    let histogram = DensityHistogram::new(&samples, bins);
    let edges = histogram.edges();
    let density = edges.iter().copied().zip(catalog.density(key, &edges)?).collect();

    Ok(SampleReport {
        seed,
        family: key,
        name: samples.family().name(),
        requested_count: samples.requested_count(),
        values: samples.to_vec(),
        stats: DescriptiveStats::new(samples.iter().copied()).map(StatsReport::from),
        histogram: histogram
            .bins
            .iter()
            .map(|bin| BinReport {
                start: bin.range.start,
                end: bin.range.end,
                count: bin.count,
                density: bin.density,
            })
            .collect(),
        density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_matches_catalog() {
        let report = build_report(Seed::default(), 4, 500, 10).unwrap();
        let mut catalog = DistributionCatalog::new(Seed::default());
        assert_eq!(report.values, catalog.sample(4, 500).unwrap().to_vec());
        assert_eq!(report.name, "uniform");
        assert_eq!(report.histogram.len(), 10);
        assert_eq!(report.density.len(), 11);
        assert_eq!(report.stats.unwrap().count, 500);
    }

    #[test]
    fn test_unknown_family_is_an_error() {
        assert!(build_report(Seed::default(), 0, 100, 10).is_err());
        assert!(build_report(Seed::default(), 6, 100, 10).is_err());
    }

    #[test]
    fn test_report_serializes_seed_as_hex() {
        let report = build_report(Seed::from_u64(1), 1, 100, 5).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "00000000000000000000000000000001");
        assert_eq!(json["family"], 1);
    }
}
