//! Configuration module for pixscene
//!
//! Provides types, discovery and parsing for `pixscene.toml`.

pub mod loader;
pub mod schema;

pub use schema::*;
