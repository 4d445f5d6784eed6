use datagames_engine::regression::X_MAX;
use ratatui::{
    prelude::{Buffer, Rect},
    symbols::Marker,
    widgets::{Axis, Block as BlockWidget, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use super::{range_labels, style};

const Y_BOUNDS: [f64; 2] = [-8.0, 8.0];

/// Scatter plot of a regression trial with its fitted line.
///
/// The axes are fixed so successive trials can be compared by eye.
#[derive(Debug)]
pub struct RegressionChart<'a> {
    points: &'a [(f64, f64)],
    fit_line: &'a [(f64, f64)],
}

impl<'a> RegressionChart<'a> {
    pub fn new(points: &'a [(f64, f64)], fit_line: &'a [(f64, f64)]) -> Self {
        Self { points, fit_line }
    }
}

impl Widget for RegressionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let x_bounds = [0.0, X_MAX];
        let datasets = vec![
            Dataset::default()
                .name("Data")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(style::SAMPLES)
                .data(self.points),
            Dataset::default()
                .name("Fit")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style::FIT)
                .data(self.fit_line),
        ];

        let chart = Chart::new(datasets)
            .block(BlockWidget::bordered().title("Data"))
            .legend_position(Some(LegendPosition::TopRight))
            .x_axis(
                Axis::default()
                    .title("x")
                    .bounds(x_bounds)
                    .labels(range_labels(x_bounds, 1)),
            )
            .y_axis(
                Axis::default()
                    .title("y")
                    .bounds(Y_BOUNDS)
                    .labels(range_labels(Y_BOUNDS, 0)),
            );
        chart.render(area, buf);
    }
}
