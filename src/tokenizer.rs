//! Token extraction from scene lines

use std::str::CharIndices;

/// Returns true for characters that separate or terminate tokens.
///
/// Only ASCII whitespace (including vertical tab) separates; non-ASCII spaces
/// such as U+00A0 stay inside a token.
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b' || c == '\0'
}

/// Lazy iterator over the whitespace-delimited tokens of a line.
///
/// Created by [`tokenize`]. Each call to `next` scans forward from where the
/// previous token ended, so the sequence is consumed once and cannot be
/// restarted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Skip any run of separators
        let start = loop {
            match self.chars.next() {
                Some((i, c)) if !is_separator(c) => break i,
                Some(_) => continue,
                None => return None,
            }
        };

        let mut end = self.rest.len();
        for (i, c) in self.chars.by_ref() {
            if is_separator(c) {
                end = i;
                break;
            }
        }

        Some(self.rest[start..end].to_string())
    }
}

/// Splits `line` into whitespace-delimited tokens, starting at byte offset `start`.
///
/// Runs of whitespace of any width count as a single separator, and leading or
/// trailing whitespace (including a `\r\n` line ending) produces no tokens. A
/// `start` beyond the end of the line, or inside a multi-byte character, yields
/// an empty sequence.
///
/// # Examples
///
/// ```
/// use pixscene::tokenizer::tokenize;
///
/// let tokens: Vec<String> = tokenize("color 4  255 0\t0 255\n", 7).collect();
/// assert_eq!(tokens, vec!["255", "0", "0", "255"]);
///
/// assert_eq!(tokenize("png", 3).count(), 0);
/// ```
pub fn tokenize(line: &str, start: usize) -> Tokens<'_> {
    let rest = line.get(start..).unwrap_or("");
    Tokens {
        rest,
        chars: rest.char_indices(),
    }
}

/// Collects every token of `line` after `start` into a vector.
pub fn tokenize_all(line: &str, start: usize) -> Vec<String> {
    tokenize(line, start).collect()
}
