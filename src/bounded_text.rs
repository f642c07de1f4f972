//! Text with a hard character limit.
//!
//! Updates that would exceed the limit are rejected whole; the field never
//! truncates. Lengths are counted in characters, not bytes.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundedText {
    text: String,
    max: usize,
}

impl BoundedText {
    pub fn new(max: usize) -> Self {
        Self {
            text: String::new(),
            max,
        }
    }

    /// Starts from existing text; `None` if it is already over the limit.
    pub fn with_text(max: usize, text: impl Into<String>) -> Option<Self> {
        let mut field = Self::new(max);
        field.update(text).then_some(field)
    }

    /// Whether `text` fits within `max` characters.
    pub fn fits(max: usize, text: &str) -> bool {
        text.chars().count() <= max
    }

    /// Replaces the text if it fits. Returns whether it was accepted.
    pub fn update(&mut self, new_text: impl Into<String>) -> bool {
        let new_text = new_text.into();
        if !Self::fits(self.max, &new_text) {
            return false;
        }
        self.text = new_text;
        true
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.count())
    }

    pub fn is_at_limit(&self) -> bool {
        self.count() >= self.max
    }

    /// More than 80% of the limit is used.
    pub fn is_near_limit(&self) -> bool {
        self.count() * 5 > self.max * 4
    }
}
