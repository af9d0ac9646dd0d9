//! Catalog data model, random selection, and configuration.

pub mod catalog;
pub mod config;
pub mod severity;
