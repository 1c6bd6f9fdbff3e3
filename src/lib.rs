//! Pixscene - Library for parsing and rendering line-oriented pixel scenes
//!
//! A scene file declares an image size and filename, colour records,
//! position records and a draw count. This library provides functionality to:
//! - Tokenize and classify scene lines
//! - Accumulate colour and position records
//! - Render scenes to RGBA buffers and save them as PNG
//! - Support both lenient and strict handling of malformed integers

pub mod cli;
pub mod config;
pub mod metadata;
pub mod models;
pub mod numeric;
pub mod output;
pub mod parser;
pub mod renderer;
pub mod tokenizer;
