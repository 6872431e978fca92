//! gamemon client library
//!
//! A caching client for the game-monitor server status service. Construct a
//! [`client::GameMonitor`] with [`client::MonitorOptions`], then query by host
//! and port.

pub mod cache;
pub mod cli;
pub mod client;
pub mod data;
pub mod log;

pub use client::{GameMonitor, MonitorOptions, SCHEMA_VERSION};
pub use data::ServerRecord;
