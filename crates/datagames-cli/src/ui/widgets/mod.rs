pub use self::{
    figure_chart::*, histogram_chart::*, key_binding_display::*, regression_chart::*,
    text_input::*,
};

mod figure_chart;
mod histogram_chart;
mod key_binding_display;
mod regression_chart;
mod text_input;

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    pub const HELP: Style = Style::new().fg(Color::DarkGray);
    pub const SAMPLES: Style = Style::new().fg(Color::Cyan);
    pub const DENSITY: Style = Style::new().fg(Color::Yellow);
    pub const FIT: Style = Style::new().fg(Color::Yellow);
    pub const SELECTED: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    pub const SUCCESS: Style = Style::new().fg(Color::Green);
    pub const FAILURE: Style = Style::new().fg(Color::Red);
}

/// Formats `[lo, mid, hi]` axis labels for a numeric range.
fn range_labels(bounds: [f64; 2], precision: usize) -> [String; 3] {
    [
        format!("{:.precision$}", bounds[0]),
        format!("{:.precision$}", f64::midpoint(bounds[0], bounds[1])),
        format!("{:.precision$}", bounds[1]),
    ]
}
