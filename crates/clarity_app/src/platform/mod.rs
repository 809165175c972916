mod app;
mod effects;
mod logging;
mod settings;
mod terminal;
mod ui;

pub use app::run_app;
