//! Tailgate library crate.
//!
//! Exposes the event catalog, its random selector, configuration, and the
//! HTTP server used by the CLI.

pub mod core;
pub mod server;
pub mod telemetry;

pub use crate::core::catalog;
pub use crate::core::config;
pub use crate::core::severity;
