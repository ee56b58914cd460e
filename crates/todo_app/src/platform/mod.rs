mod app;
mod config;
mod confirm;
mod effects;
mod ui;

pub use app::run_app;
