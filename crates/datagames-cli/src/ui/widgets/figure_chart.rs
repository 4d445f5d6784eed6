use datagames_engine::reveal::{FigureState, Tick, Trace, TraceKind};
use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Text,
    widgets::{Axis, Block as BlockWidget, Chart, Dataset, GraphType, Widget},
};

use super::style;

/// Half-width of a drawn bar, in data units.
const BAR_HALF_WIDTH: f64 = 0.32;
const BAR_STROKES: i32 = 4;
const MAX_TICK_SLOTS: usize = 48;

/// Renders the revealed part of a figure; unrevealed properties are left out.
#[derive(Debug)]
pub struct FigureChart<'a> {
    state: &'a FigureState,
}

impl<'a> FigureChart<'a> {
    pub fn new(state: &'a FigureState) -> Self {
        Self { state }
    }
}

impl Widget for FigureChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut block = BlockWidget::bordered();
        if let Some(title) = &self.state.title {
            block = block.title(title.as_str());
        }

        let Some(trace) = &self.state.trace else {
            let text_area = block.inner(area).centered_vertically(Constraint::Length(1));
            block.render(area, buf);
            Text::from("Nothing revealed yet")
                .style(style::HELP)
                .centered()
                .render(text_area, buf);
            return;
        };

        let series = trace_series(trace);
        let datasets = series
            .iter()
            .map(|(points, style)| {
                let graph_type = match trace.kind {
                    TraceKind::Bar => GraphType::Bar,
                    TraceKind::Line => GraphType::Line,
                };
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(graph_type)
                    .style(*style)
                    .data(points)
            })
            .collect::<Vec<_>>();

        let x_axis = build_axis(
            self.state.x_label.as_deref(),
            self.state.x_ticks.as_deref(),
            x_range(trace),
        );
        let y_axis = build_axis(
            self.state.y_label.as_deref(),
            self.state.y_ticks.as_deref(),
            y_range(trace),
        );

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// Splits a trace into drawable point series with their styles.
///
/// Bars become one series each, drawn as a bundle of vertical strokes so
/// they read as filled bars and can carry their own colour.
fn trace_series(trace: &Trace) -> Vec<(Vec<(f64, f64)>, Style)> {
    match trace.kind {
        TraceKind::Line => vec![(trace.points().collect(), style::SAMPLES)],
        TraceKind::Bar => trace
            .points()
            .enumerate()
            .map(|(i, (x, y))| {
                let strokes = (-BAR_STROKES..=BAR_STROKES)
                    .map(|k| {
                        let offset = BAR_HALF_WIDTH * f64::from(k) / f64::from(BAR_STROKES);
                        (x + offset, y)
                    })
                    .collect();
                let style = trace.colors.get(i).map_or(style::SAMPLES, |&[r, g, b]| {
                    Style::new().fg(Color::Rgb(r, g, b))
                });
                (strokes, style)
            })
            .collect(),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some([v, v]),
        Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
    })
}

fn x_range(trace: &Trace) -> Option<[f64; 2]> {
    let [lo, hi] = min_max(trace.x.iter().copied())?;
    match trace.kind {
        TraceKind::Bar => Some([lo - 0.5, hi + 0.5]),
        TraceKind::Line => Some([lo, hi]),
    }
}

fn y_range(trace: &Trace) -> Option<[f64; 2]> {
    let [lo, hi] = min_max(trace.y.iter().copied())?;
    match trace.kind {
        TraceKind::Bar => Some([lo.min(0.0), hi.max(0.0)]),
        TraceKind::Line => Some([lo, hi]),
    }
}

fn build_axis<'a>(
    label: Option<&'a str>,
    ticks: Option<&[Tick]>,
    data: Option<[f64; 2]>,
) -> Axis<'a> {
    let layout = match ticks {
        Some(ticks) => AxisLayout::with_ticks(ticks, data),
        None => AxisLayout::plain(data),
    };
    let mut axis = Axis::default().bounds(layout.bounds).labels(layout.labels);
    if let Some(label) = label {
        axis = axis.title(label);
    }
    axis
}

/// Axis bounds plus labels spread evenly across them.
#[derive(Debug, Clone, PartialEq)]
struct AxisLayout {
    bounds: [f64; 2],
    labels: Vec<String>,
}

impl AxisLayout {
    /// Bounds around `data` with a small margin and no labels.
    fn plain(data: Option<[f64; 2]>) -> Self {
        let [lo, hi] = data.unwrap_or([0.0, 1.0]);
        let margin = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
        Self {
            bounds: [lo - margin, hi + margin],
            labels: vec![],
        }
    }

    /// Bounds snapped to the tick spacing, so evenly spread label slots land
    /// on the tick positions.
    ///
    /// Slots without a tick get an empty label. Ticks that do not share a
    /// common spacing, or would need too many slots, fall back to listing the
    /// labels in position order.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn with_ticks(ticks: &[Tick], data: Option<[f64; 2]>) -> Self {
        let mut ticks = ticks
            .iter()
            .filter(|tick| tick.position.is_finite())
            .collect::<Vec<_>>();
        ticks.sort_by(|a, b| a.position.total_cmp(&b.position));
        let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
            return Self::plain(data);
        };
        let (first, last) = (first.position, last.position);

        let spacing = ticks
            .windows(2)
            .map(|pair| pair[1].position - pair[0].position)
            .filter(|gap| *gap > 0.0)
            .fold(f64::INFINITY, f64::min);
        let spacing = if spacing.is_finite() { spacing } else { 1.0 };

        let [lo, hi] = data.map_or([first, last], |[lo, hi]| [lo.min(first), hi.max(last)]);
        let lo = first - ((first - lo) / spacing).ceil() * spacing;
        let mut hi = last + ((hi - last) / spacing).ceil() * spacing;
        if hi - lo < spacing {
            hi = lo + spacing;
        }

        let span = ((hi - lo) / spacing).round();
        let aligned = ticks.iter().all(|tick| {
            let slot = (tick.position - lo) / spacing;
            (slot - slot.round()).abs() < 1e-6
        });
        if !span.is_finite() || span >= MAX_TICK_SLOTS as f64 || !aligned {
            return Self {
                bounds: [lo, hi],
                labels: ticks.iter().map(|tick| tick.label.clone()).collect(),
            };
        }
        let slots = span as usize + 1;

        let labels = (0..slots)
            .map(|slot| {
                let at = lo + spacing * slot as f64;
                ticks
                    .iter()
                    .find(|tick| (tick.position - at).abs() < spacing * 1e-6)
                    .map_or_else(String::new, |tick| tick.label.clone())
            })
            .collect();
        Self {
            bounds: [lo, hi],
            labels,
        }
    }
}
