pub mod app;
pub mod backend;
pub mod config;
pub mod logging;
pub mod triage;
pub mod ui;
