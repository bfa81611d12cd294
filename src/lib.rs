pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod events;
pub mod location;
pub mod logging;
pub mod models;
pub mod ui;
pub mod viewmodel;
