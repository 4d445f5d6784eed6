//! Minimal event-driven terminal runtime for the datagames host.
//!
//! The games only change state in response to key presses, so the runtime
//! redraws after every terminal event and otherwise blocks on input.
//!
//! - [`App`] - Top-level application driven by [`Runtime::run`]
//! - [`Screen`] / [`ScreenStack`] - Stack of screens with push/pop navigation

pub use self::{
    app::App,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
