//! Accumulation of colour and position records
//!
//! Records are appended in input order and never removed or reordered.
//! Collections grow without bound unless a per-category limit is set.

use crate::models::IntegerList;
use thiserror::Error;

/// Which record collection a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Color,
    Position,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Color => write!(f, "color"),
            RecordKind::Position => write!(f, "position"),
        }
    }
}

/// Error when a record collection is already at its configured limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("too many {kind} records (limit is {limit})")]
pub struct CapacityError {
    pub kind: RecordKind,
    pub limit: usize,
}

/// Colour records, position records and the draw count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    colors: Vec<IntegerList>,
    positions: Vec<IntegerList>,
    draw_count: i32,
    limit: Option<usize>,
}

impl Metadata {
    /// Creates empty metadata with no record limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty metadata that holds at most `limit` records per category.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn push_color(&mut self, list: IntegerList) -> Result<(), CapacityError> {
        Self::push(&mut self.colors, list, self.limit, RecordKind::Color)
    }

    pub fn push_position(&mut self, list: IntegerList) -> Result<(), CapacityError> {
        Self::push(&mut self.positions, list, self.limit, RecordKind::Position)
    }

    fn push(
        records: &mut Vec<IntegerList>,
        list: IntegerList,
        limit: Option<usize>,
        kind: RecordKind,
    ) -> Result<(), CapacityError> {
        if let Some(limit) = limit {
            if records.len() >= limit {
                return Err(CapacityError { kind, limit });
            }
        }
        records.push(list);
        Ok(())
    }

    /// Replaces the draw count; the last `drawPixels` line wins.
    pub fn set_draw_count(&mut self, n: i32) {
        self.draw_count = n;
    }

    pub fn colors(&self) -> &[IntegerList] {
        &self.colors
    }

    pub fn positions(&self) -> &[IntegerList] {
        &self.positions
    }

    pub fn draw_count(&self) -> i32 {
        self.draw_count
    }

    /// The only colour record consulted when drawing.
    pub fn first_color(&self) -> Option<&IntegerList> {
        self.colors.first()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
