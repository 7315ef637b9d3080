//! Heatmap service library.
//!
//! Loads the monthly variance dataset, lays out the chart once and either
//! writes it to disk or serves it over HTTP.

pub mod config;
pub mod loader;
pub mod render;
pub mod server;
pub mod state;
