//! Line-oriented scene parsing
//!
//! Each input line is classified by a literal keyword prefix, checked in
//! priority order:
//!
//! ```text
//! png <width> <height> <filename>
//! color 4 <r0> <g0> <b0> <a0> [<r1> <g1> <b1> <a1> ...]
//! position 2 <x0> <y0> [<x1> <y1> ...]
//! drawPixels <count>
//! ```
//!
//! Lines matching none of the prefixes are ignored. The arity in `color 4` and
//! `position 2` is part of the keyword only; records are stored raw and
//! grouped by stride when drawing.

use crate::metadata::{CapacityError, Metadata};
use crate::models::{ImageSpec, IntegerList, Scene, Warning};
use crate::numeric::{interpret, is_numeric, NumericError, NumericPolicy};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;

/// A recognised line type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `png`: dimensions and output filename
    Header,
    /// `color 4`: a colour record
    Color,
    /// `position 2`: a position record
    Position,
    /// `drawPixels`: the draw count
    DrawPixels,
}

impl Directive {
    /// Directives in the order their prefixes are tested.
    const PRIORITY: [Directive; 4] = [
        Directive::Header,
        Directive::Color,
        Directive::Position,
        Directive::DrawPixels,
    ];

    /// The literal prefix that introduces this directive.
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Header => "png",
            Directive::Color => "color 4",
            Directive::Position => "position 2",
            Directive::DrawPixels => "drawPixels",
        }
    }

    /// Classifies a line by exact prefix match; the first match wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscene::parser::Directive;
    ///
    /// assert_eq!(Directive::classify("png 2 2 out.png"), Some(Directive::Header));
    /// assert_eq!(Directive::classify("color  4 1 2 3 4"), None);
    /// assert_eq!(Directive::classify("# comment"), None);
    /// ```
    pub fn classify(line: &str) -> Option<Directive> {
        Self::PRIORITY
            .into_iter()
            .find(|directive| line.starts_with(directive.keyword()))
    }
}

/// Which `png` header token names the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilenamePolicy {
    /// Every token overwrites the filename, so the last token wins even when
    /// it is numeric
    #[default]
    LastToken,
    /// Only non-numeric tokens are filename candidates; the last one wins
    LastNonNumeric,
}

/// Options controlling how a scene is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub numbers: NumericPolicy,
    pub header_filename: FilenamePolicy,
    /// Maximum records per category; `None` is unbounded
    pub max_records: Option<usize>,
}

impl ParseOptions {
    /// Default options with strict numeric conversion.
    pub fn strict() -> Self {
        Self {
            numbers: NumericPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_filename_policy(mut self, policy: FilenamePolicy) -> Self {
        self.header_filename = policy;
        self
    }
}

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: failed to read input: {message}")]
    Io { line: usize, message: String },
    #[error("missing `png` header line")]
    MissingHeader,
    #[error("line {line}: duplicate `png` header (first defined on line {first})")]
    DuplicateHeader { line: usize, first: usize },
    #[error("line {line}: `png` header needs a width and a height")]
    MissingDimensions { line: usize },
    #[error("line {line}: unexpected third dimension '{token}' in `png` header")]
    ExtraDimension { line: usize, token: String },
    #[error("line {line}: invalid dimension '{token}', expected a positive integer")]
    InvalidDimension { line: usize, token: String },
    #[error("line {line}: `png` header has no output filename")]
    MissingFilename { line: usize },
    #[error("line {line}: `drawPixels` has no pixel count")]
    MissingDrawCount { line: usize },
    #[error("line {line}: {source}")]
    Numeric {
        line: usize,
        #[source]
        source: NumericError,
    },
    #[error("line {line}: {source}")]
    Capacity {
        line: usize,
        #[source]
        source: CapacityError,
    },
}

impl ParseError {
    /// The 1-based input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MissingHeader => None,
            ParseError::Io { line, .. }
            | ParseError::DuplicateHeader { line, .. }
            | ParseError::MissingDimensions { line }
            | ParseError::ExtraDimension { line, .. }
            | ParseError::InvalidDimension { line, .. }
            | ParseError::MissingFilename { line }
            | ParseError::MissingDrawCount { line }
            | ParseError::Numeric { line, .. }
            | ParseError::Capacity { line, .. } => Some(*line),
        }
    }
}

/// Result of parsing a scene.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub scene: Scene,
    pub warnings: Vec<Warning>,
    /// Lines that matched no directive
    pub ignored_lines: usize,
}

/// Parses a `png` header line.
///
/// The first two digit-only tokens are the width and height. The filename is
/// chosen according to `policy`.
pub fn parse_header(
    text: &str,
    line: usize,
    policy: FilenamePolicy,
) -> Result<(ImageSpec, Vec<Warning>), ParseError> {
    let mut dimensions: Vec<u32> = Vec::with_capacity(2);
    let mut filename: Option<String> = None;

    for token in tokenize(text, Directive::Header.keyword().len()) {
        let numeric = is_numeric(&token);
        if numeric {
            if dimensions.len() == 2 {
                return Err(ParseError::ExtraDimension { line, token });
            }
            let value = match token.parse::<u32>() {
                Ok(v) if v > 0 => v,
                _ => return Err(ParseError::InvalidDimension { line, token }),
            };
            dimensions.push(value);
        }

        if !numeric || policy == FilenamePolicy::LastToken {
            filename = Some(token);
        }
    }

    let (width, height) = match dimensions[..] {
        [w, h] => (w, h),
        _ => return Err(ParseError::MissingDimensions { line }),
    };
    let filename = filename.ok_or(ParseError::MissingFilename { line })?;

    let mut warnings = Vec::new();
    if is_numeric(&filename) {
        warnings.push(Warning::new(
            format!(
                "output filename '{}' is numeric; the last token on the `png` line names the file",
                filename
            ),
            line,
        ));
    }

    Ok((
        ImageSpec {
            width,
            height,
            filename,
        },
        warnings,
    ))
}

/// Converts every token after the directive keyword into an integer list.
fn parse_integers(
    text: &str,
    directive: Directive,
    line: usize,
    policy: NumericPolicy,
    warnings: &mut Vec<Warning>,
) -> Result<IntegerList, ParseError> {
    let mut values = Vec::new();
    for token in tokenize(text, directive.keyword().len()) {
        values.push(convert(&token, line, policy, warnings)?);
    }
    Ok(IntegerList::new(values))
}

fn convert(
    token: &str,
    line: usize,
    policy: NumericPolicy,
    warnings: &mut Vec<Warning>,
) -> Result<i32, ParseError> {
    let interpreted =
        interpret(token, policy).map_err(|source| ParseError::Numeric { line, source })?;
    if !interpreted.exact {
        warnings.push(Warning::new(
            format!("'{}' is not an integer, using {}", token, interpreted.value),
            line,
        ));
    }
    Ok(interpreted.value)
}

/// Parses a scene from a line reader.
///
/// All lines are consumed before returning. A missing or repeated `png`
/// header is an error; everything else follows `options`.
pub fn parse_stream<R: BufRead>(mut reader: R, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    let mut metadata = Metadata::with_limit(options.max_records);
    let mut header: Option<(ImageSpec, usize)> = None;
    let mut warnings = Vec::new();
    let mut ignored_lines = 0;

    let mut buf = Vec::new();
    let mut line = 0;
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|e| ParseError::Io {
            line: line + 1,
            message: e.to_string(),
        })?;
        if read == 0 {
            break;
        }
        line += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        // Bytes are not required to be UTF-8; invalid sequences become U+FFFD
        let text = String::from_utf8_lossy(&buf);

        let Some(directive) = Directive::classify(&text) else {
            ignored_lines += 1;
            continue;
        };

        match directive {
            Directive::Header => {
                if let Some((_, first)) = &header {
                    return Err(ParseError::DuplicateHeader { line, first: *first });
                }
                let (spec, header_warnings) = parse_header(&text, line, options.header_filename)?;
                warnings.extend(header_warnings);
                header = Some((spec, line));
            }
            Directive::Color => {
                let list = parse_integers(&text, directive, line, options.numbers, &mut warnings)?;
                metadata
                    .push_color(list)
                    .map_err(|source| ParseError::Capacity { line, source })?;
            }
            Directive::Position => {
                let list = parse_integers(&text, directive, line, options.numbers, &mut warnings)?;
                metadata
                    .push_position(list)
                    .map_err(|source| ParseError::Capacity { line, source })?;
            }
            Directive::DrawPixels => {
                // Only the first token is the count; anything after it is ignored
                match tokenize(&text, directive.keyword().len()).next() {
                    Some(token) => {
                        let n = convert(&token, line, options.numbers, &mut warnings)?;
                        metadata.set_draw_count(n);
                    }
                    None if options.numbers == NumericPolicy::Strict => {
                        return Err(ParseError::MissingDrawCount { line });
                    }
                    None => warnings.push(Warning::new(
                        format!(
                            "`drawPixels` has no pixel count, keeping {}",
                            metadata.draw_count()
                        ),
                        line,
                    )),
                }
            }
        }
    }

    let (image, _) = header.ok_or(ParseError::MissingHeader)?;
    Ok(ParseResult {
        scene: Scene { image, metadata },
        warnings,
        ignored_lines,
    })
}

/// Parses a scene held in memory.
pub fn parse_str(input: &str, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    parse_stream(input.as_bytes(), options)
}
