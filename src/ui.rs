//! Ratatui front-end for the bookstore browser. The module is split by
//! concern: `app` owns the Screen/Mode state machine and key handling,
//! `screens` holds the renderer-independent backing state for each view,
//! `terminal` runs the raw-mode event loop, and `helpers` carries the small
//! layout and error-formatting utilities shared by the draw code.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
