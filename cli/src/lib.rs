//! planwatch-cli library, exposed for unit tests.

pub mod app;
pub mod commands;
pub mod log_renderer;
pub mod render;
pub mod tui;
