use datagames_stats::histogram::DensityHistogram;
use ratatui::{
    prelude::{Buffer, Rect},
    symbols::Marker,
    widgets::{Axis, Block as BlockWidget, Chart, Dataset, GraphType, Widget},
};

use super::{range_labels, style};

/// Normalised histogram of a sample set, optionally overlaid with a density curve.
#[derive(Debug)]
pub struct HistogramChart<'a> {
    histogram: &'a DensityHistogram,
    density: Option<&'a [(f64, f64)]>,
    title: &'a str,
}

impl<'a> HistogramChart<'a> {
    pub fn new(histogram: &'a DensityHistogram, title: &'a str) -> Self {
        Self {
            histogram,
            density: None,
            title,
        }
    }

    pub fn density(self, density: Option<&'a [(f64, f64)]>) -> Self {
        Self { density, ..self }
    }
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let bars = self
            .histogram
            .bins
            .iter()
            .map(|bin| (f64::midpoint(bin.range.start, bin.range.end), bin.density))
            .collect::<Vec<_>>();

        let x_bounds = match (self.histogram.bins.first(), self.histogram.bins.last()) {
            (Some(first), Some(last)) => [first.range.start, last.range.end],
            _ => [0.0, 1.0],
        };
        let density_max = self
            .density
            .into_iter()
            .flatten()
            .map(|&(_, y)| y)
            .fold(0.0, f64::max);
        let y_max = f64::max(self.histogram.max_density(), density_max);
        let y_bounds = [0.0, if y_max > 0.0 { y_max * 1.05 } else { 1.0 }];

        let mut datasets = vec![
            Dataset::default()
                .name("samples")
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(style::SAMPLES)
                .data(&bars),
        ];
        if let Some(density) = self.density {
            datasets.push(
                Dataset::default()
                    .name("density")
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(style::DENSITY)
                    .data(density),
            );
        }

        let chart = Chart::new(datasets)
            .block(BlockWidget::bordered().title(self.title))
            .x_axis(
                Axis::default()
                    .bounds(x_bounds)
                    .labels(range_labels(x_bounds, 2)),
            )
            .y_axis(
                Axis::default()
                    .title("density")
                    .bounds(y_bounds)
                    .labels(range_labels(y_bounds, 2)),
            );
        chart.render(area, buf);
    }
}
