use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::Page;

const DEFAULT_CAPACITY: usize = 32;

/// Pages visited before the current one, most recent last.
///
/// Bounded: once full, the oldest entry is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: VecDeque<Page>,
    capacity: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NavigationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, page: Page) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(page);
    }

    pub fn pop(&mut self) -> Option<Page> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<Page> {
        self.entries.back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
