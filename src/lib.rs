//! # Site Telemetry Library
//!
//! This library provides the core functionality for the site telemetry
//! service: configuration, persistence, validation, HTTP handlers and the
//! field-client simulator.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod simulator;
pub mod telemetry;
pub mod validation;
pub use migration;
