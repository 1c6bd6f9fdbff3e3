//! Scene rendering to image buffers
//!
//! Position records are walked in order, `n` XY pairs per record, and each
//! pair takes its RGBA value from the first colour record:
//!
//! ```text
//! for each position record j:
//!     for p in 0..n:
//!         (x, y)        = positions[j][2p], positions[j][2p + 1]
//!         (r, g, b, a)  = colors[0][base .. base + 4]
//! ```
//!
//! With [`ColorIndexing::Restart`] `base` is `4p`, so every position record
//! reuses the same leading colour groups. With [`ColorIndexing::Continue`]
//! colour groups keep advancing across records.

use crate::models::{IntegerList, Scene, Warning};
use crate::numeric::NumericPolicy;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integers consumed per position.
pub const POSITION_STRIDE: usize = 2;

/// Integers consumed per colour.
pub const COLOR_STRIDE: usize = 4;

/// Transparent black, the zeroed encoder default.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How the colour record is indexed across multiple position records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorIndexing {
    /// Colour indexing starts over for every position record
    #[default]
    Restart,
    /// Colour groups continue where the previous position record stopped
    Continue,
}

/// Options controlling how a scene is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color_indexing: ColorIndexing,
    /// Initial value of every pixel
    pub background: Rgba<u8>,
    /// Strict rejects channel values outside 0-255; lenient truncates them
    pub channels: NumericPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color_indexing: ColorIndexing::default(),
            background: TRANSPARENT,
            channels: NumericPolicy::default(),
        }
    }
}

/// Error type for rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no color record to draw {pixels} pixel(s) with")]
    NoColorRecord { pixels: usize },
    #[error(
        "position record {record} has {len} values, pixel {pixel} needs index {index}"
    )]
    PositionOutOfRange {
        record: usize,
        pixel: usize,
        index: usize,
        len: usize,
    },
    #[error("color record has {len} values, pixel {pixel} needs index {index}")]
    ColorOutOfRange { pixel: usize, index: usize, len: usize },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("channel value {value} at color index {index} is outside 0-255")]
    ChannelOutOfRange { value: i32, index: usize },
    #[error("a {width}x{height} image does not fit in memory")]
    ImageTooLarge { width: u32, height: u32 },
}

/// A rendered image and the warnings produced while drawing it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub warnings: Vec<Warning>,
}

fn position_at(
    record: &IntegerList,
    record_index: usize,
    pixel: usize,
    index: usize,
) -> Result<i32, RenderError> {
    record.get(index).ok_or(RenderError::PositionOutOfRange {
        record: record_index,
        pixel,
        index,
        len: record.len(),
    })
}

fn channel_at(
    colors: &IntegerList,
    pixel: usize,
    index: usize,
    policy: NumericPolicy,
    warnings: &mut Vec<Warning>,
) -> Result<u8, RenderError> {
    let value = colors.get(index).ok_or(RenderError::ColorOutOfRange {
        pixel,
        index,
        len: colors.len(),
    })?;

    match u8::try_from(value) {
        Ok(channel) => Ok(channel),
        Err(_) if policy == NumericPolicy::Strict => {
            Err(RenderError::ChannelOutOfRange { value, index })
        }
        Err(_) => {
            // Keep the low byte, as storing into an 8-bit channel would
            let channel = value as u8;
            warnings.push(Warning::new(
                format!(
                    "channel value {} at color index {} truncated to {}",
                    value, index, channel
                ),
                0,
            ));
            Ok(channel)
        }
    }
}

/// Allocate a `width`x`height` canvas filled with `background`.
///
/// Oversized or unallocatable canvases are reported instead of aborting.
fn allocate_canvas(width: u32, height: u32, background: Rgba<u8>) -> Result<RgbaImage, RenderError> {
    let too_large = RenderError::ImageTooLarge { width, height };
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| too_large.clone())?;
    let len = pixels.checked_mul(COLOR_STRIDE).ok_or_else(|| too_large.clone())?;

    let mut data: Vec<u8> = Vec::new();
    data.try_reserve_exact(len).map_err(|_| too_large.clone())?;
    for _ in 0..pixels {
        data.extend_from_slice(&background.0);
    }
    RgbaImage::from_raw(width, height, data).ok_or(too_large)
}

/// Render a scene to an RGBA image buffer.
///
/// Pixels not written by any position keep the background colour. Later
/// writes to the same coordinate overwrite earlier ones. Reads past the end of
/// a record and coordinates outside the image are errors, as is an image too
/// large to allocate.
///
/// # Examples
///
/// ```
/// use pixscene::parser::{parse_str, ParseOptions};
/// use pixscene::renderer::{render_scene, RenderOptions};
/// use image::Rgba;
///
/// let input = "png 2 2 out.png\ncolor 4 255 0 0 255\nposition 2 1 0\ndrawPixels 1\n";
/// let parsed = parse_str(input, &ParseOptions::default()).unwrap();
/// let rendered = render_scene(&parsed.scene, &RenderOptions::default()).unwrap();
///
/// assert_eq!(*rendered.image.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
/// assert_eq!(*rendered.image.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
/// ```
pub fn render_scene(scene: &Scene, options: &RenderOptions) -> Result<Rendered, RenderError> {
    let spec = &scene.image;
    let metadata = &scene.metadata;
    let mut image = allocate_canvas(spec.width, spec.height, options.background)?;
    let mut warnings = Vec::new();

    // A non-positive draw count draws nothing
    let pairs = usize::try_from(metadata.draw_count()).unwrap_or(0);
    let positions = metadata.positions();
    if pairs == 0 || positions.is_empty() {
        return Ok(Rendered { image, warnings });
    }

    let colors = metadata.first_color().ok_or(RenderError::NoColorRecord {
        pixels: pairs * positions.len(),
    })?;

    for (j, record) in positions.iter().enumerate() {
        for p in 0..pairs {
            let pixel = j * pairs + p;
            let k = p * POSITION_STRIDE;
            let x = position_at(record, j, pixel, k)?;
            let y = position_at(record, j, pixel, k + 1)?;

            let base = match options.color_indexing {
                ColorIndexing::Restart => p * COLOR_STRIDE,
                ColorIndexing::Continue => pixel * COLOR_STRIDE,
            };
            let mut rgba = [0u8; COLOR_STRIDE];
            for (offset, channel) in rgba.iter_mut().enumerate() {
                *channel = channel_at(colors, pixel, base + offset, options.channels, &mut warnings)?;
            }

            let in_bounds = x >= 0 && y >= 0 && (x as u32) < spec.width && (y as u32) < spec.height;
            if !in_bounds {
                return Err(RenderError::PixelOutOfBounds {
                    x,
                    y,
                    width: spec.width,
                    height: spec.height,
                });
            }
            image.put_pixel(x as u32, y as u32, Rgba(rgba));
        }
    }

    Ok(Rendered { image, warnings })
}
