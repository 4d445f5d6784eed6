//! Progressive disclosure of chart properties for the "guess the figure" game.
//!
//! - [`Figure`] - A complete figure (trace, labels, ticks, title)
//! - [`FigureState`] - The properties revealed so far
//! - [`RevealStep`] - The fixed order in which properties are revealed
//! - [`RevealStateMachine`] - Figure selection, reveal cursor and reset

pub use self::{builtin::*, figure::*, state_machine::*};

mod builtin;
mod figure;
mod state_machine;
