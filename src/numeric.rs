//! Numeric token interpretation
//!
//! Scene files carry integers as plain decimal tokens. How a token that is not
//! a well-formed integer is treated depends on the [`NumericPolicy`]:
//!
//! - **Lenient** (default): `atoi`-style leading-digit parsing, so `"12px"`
//!   becomes 12 and `"abc"` becomes 0. The result is flagged as inexact so
//!   callers can warn.
//! - **Strict**: the token must parse as an `i32` or an error is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How tokens that should be integers are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Coerce malformed tokens using leading-digit parsing
    #[default]
    Lenient,
    /// Reject any token that is not a well-formed integer
    Strict,
}

/// Error for a token rejected under [`NumericPolicy::Strict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
}

/// The integer value of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpreted {
    pub value: i32,
    /// False when the token was coerced rather than parsed exactly
    pub exact: bool,
}

/// Returns true if the token is non-empty and made only of ASCII decimal digits.
///
/// No sign, decimal point or surrounding whitespace is accepted. The empty
/// string is not numeric.
///
/// # Examples
///
/// ```
/// use pixscene::numeric::is_numeric;
///
/// assert!(is_numeric("300"));
/// assert!(!is_numeric("-1"));
/// assert!(!is_numeric("scene.png"));
/// assert!(!is_numeric(""));
/// ```
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses the leading integer of a string, `atoi` style.
///
/// Leading ASCII whitespace is skipped, one optional `+` or `-` is accepted, and
/// digits are read until the first non-digit. Returns 0 when there are no
/// digits. Values beyond the `i32` range saturate.
pub fn leading_int(token: &str) -> i32 {
    let s = token.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(|b| b.is_ascii_digit()) {
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }

    let signed = if negative { -value } else { value };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Converts a token to an integer under the given policy.
pub fn interpret(token: &str, policy: NumericPolicy) -> Result<Interpreted, NumericError> {
    match token.parse::<i32>() {
        Ok(value) => Ok(Interpreted { value, exact: true }),
        Err(_) => match policy {
            NumericPolicy::Strict => Err(NumericError::NotAnInteger(token.to_string())),
            NumericPolicy::Lenient => Ok(Interpreted {
                value: leading_int(token),
                exact: false,
            }),
        },
    }
}
