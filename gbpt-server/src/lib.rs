//! Greater Boston Public Transit API server.
//!
//! A thin HTTP API over the MBTA v3 API: lists lines and stops in a
//! simplified JSON shape.

pub mod config;
pub mod lines;
pub mod logging;
pub mod mbta;
pub mod modules;
pub mod server;
pub mod stops;
pub mod web;

pub use config::{AppConfig, ConfigError};
