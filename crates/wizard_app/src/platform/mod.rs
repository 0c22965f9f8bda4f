mod app;
mod config;
mod effects;
mod logging;
pub mod ui;

pub use app::run_app;

use wizard_core::Msg;

/// Everything the main loop reacts to, from the console or the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Msg(Msg),
    /// Raw place argument: inline JSON or a path to a JSON file.
    SelectPlace(String),
    Help,
    Unrecognized(String),
    Quit,
    InputClosed,
}
