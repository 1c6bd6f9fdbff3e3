//! Configuration schema types for `pixscene.toml`
//!
//! Defines the structure and validation rules for scene rendering options.

use crate::numeric::NumericPolicy;
use crate::parser::{FilenamePolicy, ParseOptions};
use crate::renderer::{ColorIndexing, RenderOptions};
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up next to scene files
pub const CONFIG_FILE_NAME: &str = "pixscene.toml";

/// Largest accepted output scale factor
pub const MAX_SCALE: u8 = 16;

/// Parsing section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParseConfig {
    /// Conversion of malformed integer tokens
    #[serde(default)]
    pub numbers: NumericPolicy,
    /// Which `png` header token names the output file
    #[serde(default)]
    pub header_filename: FilenamePolicy,
    /// Maximum records per category (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_records: Option<usize>,
}

impl ParseConfig {
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            numbers: self.numbers,
            header_filename: self.header_filename,
            max_records: self.max_records,
        }
    }
}

/// Drawing section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Colour record indexing across position records
    #[serde(default)]
    pub color_indexing: ColorIndexing,
    /// Initial RGBA value of every pixel
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    /// Nearest-neighbour upscale factor applied before saving
    #[serde(default = "default_scale")]
    pub scale: u8,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            color_indexing: ColorIndexing::default(),
            background: default_background(),
            scale: default_scale(),
        }
    }
}

fn default_background() -> [u8; 4] {
    [0, 0, 0, 0]
}

fn default_scale() -> u8 {
    1
}

impl DrawConfig {
    /// Render options; out-of-range channels follow the given numeric policy.
    pub fn options(&self, channels: NumericPolicy) -> RenderOptions {
        RenderOptions {
            color_indexing: self.color_indexing,
            background: Rgba(self.background),
            channels,
        }
    }
}

/// Complete pixscene.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PixsceneConfig {
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "draw.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' {}", CONFIG_FILE_NAME, self.field, self.message)
    }
}

impl PixsceneConfig {
    /// Whether malformed tokens and warnings are fatal
    pub fn is_strict(&self) -> bool {
        self.parse.numbers == NumericPolicy::Strict
    }

    pub fn parse_options(&self) -> ParseOptions {
        self.parse.options()
    }

    pub fn render_options(&self) -> RenderOptions {
        self.draw.options(self.parse.numbers)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.draw.scale == 0 || self.draw.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "draw.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if self.parse.max_records == Some(0) {
            errors.push(ConfigValidationError {
                field: "parse.max_records".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}
