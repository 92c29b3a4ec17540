//! City Forecast Library
//!
//! Forecast normalization core, the OpenWeatherMap gateway, and the terminal
//! front end. Exposed as a library for integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod report;
pub mod ui;
