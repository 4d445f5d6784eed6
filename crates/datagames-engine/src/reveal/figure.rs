use serde::{Deserialize, Serialize};

/// One unit of progressive disclosure.
///
/// Every figure is revealed in the order of [`RevealStep::ORDER`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RevealStep {
    #[display("trace")]
    Trace,
    #[display("x label")]
    XLabel,
    #[display("y label")]
    YLabel,
    #[display("x ticks")]
    XTicks,
    #[display("y ticks")]
    YTicks,
    #[display("title")]
    Title,
}

impl RevealStep {
    /// The fixed reveal order shared by every figure.
    pub const ORDER: [Self; 6] = [
        Self::Trace,
        Self::XLabel,
        Self::YLabel,
        Self::XTicks,
        Self::YTicks,
        Self::Title,
    ];
}

/// An axis tick: a label drawn at a data position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub label: String,
    pub position: f64,
}

impl Tick {
    pub fn new<S>(label: S, position: f64) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Line,
}

/// The data series of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub kind: TraceKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Optional per-point RGB colours (bars only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<[u8; 3]>,
}

impl Trace {
    /// Returns the `(x, y)` pairs of the trace.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A complete figure whose properties are revealed one step at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub trace: Trace,
}

/// The properties of a figure revealed so far.
///
/// The default value is the empty figure: no trace, labels, ticks or title.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FigureState {
    pub trace: Option<Trace>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_ticks: Option<Vec<Tick>>,
    pub y_ticks: Option<Vec<Tick>>,
    pub title: Option<String>,
}

impl FigureState {
    /// Copies the property named by `step` from `figure`.
    pub fn apply(&mut self, step: RevealStep, figure: &Figure) {
        match step {
            RevealStep::Trace => self.trace = Some(figure.trace.clone()),
            RevealStep::XLabel => self.x_label = Some(figure.x_label.clone()),
            RevealStep::YLabel => self.y_label = Some(figure.y_label.clone()),
            RevealStep::XTicks => self.x_ticks = Some(figure.x_ticks.clone()),
            RevealStep::YTicks => self.y_ticks = Some(figure.y_ticks.clone()),
            RevealStep::Title => self.title = Some(figure.title.clone()),
        }
    }

    /// Returns whether the property named by `step` has been revealed.
    #[must_use]
    pub fn is_applied(&self, step: RevealStep) -> bool {
        match step {
            RevealStep::Trace => self.trace.is_some(),
            RevealStep::XLabel => self.x_label.is_some(),
            RevealStep::YLabel => self.y_label.is_some(),
            RevealStep::XTicks => self.x_ticks.is_some(),
            RevealStep::YTicks => self.y_ticks.is_some(),
            RevealStep::Title => self.title.is_some(),
        }
    }

    /// Returns the revealed properties in reveal order.
    #[must_use]
    pub fn applied(&self) -> Vec<RevealStep> {
        RevealStep::ORDER
            .into_iter()
            .filter(|&step| self.is_applied(step))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied().is_empty()
    }
}
