//! Data models for parsed scenes

use crate::metadata::Metadata;

/// An ordered list of integers parsed from one `color` or `position` line.
///
/// Values are stored raw; grouping into RGBA or XY units happens at draw time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerList {
    values: Vec<i32>,
}

impl IntegerList {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}

impl From<Vec<i32>> for IntegerList {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}

/// Output image dimensions and filename, taken from the `png` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    pub filename: String,
}

/// A fully parsed scene: the header plus accumulated records.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub image: ImageSpec,
    pub metadata: Metadata,
}

/// A warning message from parsing or rendering.
///
/// `line` is 1-based; 0 means the warning is not tied to an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

impl Warning {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "line {}: {}", self.line, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_list_access() {
        let list = IntegerList::from(vec![255, 0, 128]);
        assert_eq!(list.len(), 3);
        assert!(!list.is_empty());
        assert_eq!(list.get(0), Some(255));
        assert_eq!(list.get(2), Some(128));
        assert_eq!(list.get(3), None);
        assert_eq!(list.as_slice(), &[255, 0, 128]);
    }

    #[test]
    fn test_integer_list_empty() {
        let list = IntegerList::default();
        assert!(list.is_empty());
        assert_eq!(list.get(0), None);
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(Warning::new("coerced", 3).to_string(), "line 3: coerced");
        assert_eq!(Warning::new("wrapped", 0).to_string(), "wrapped");
    }
}
