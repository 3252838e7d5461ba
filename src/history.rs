//! Bounded history of completed operations, newest shown first

use std::collections::VecDeque;
use std::fmt::Write as _;

use crate::models::OperationRecord;

pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct OperationHistory {
    records: VecDeque<OperationRecord>,
    capacity: usize,
}

impl Default for OperationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl OperationHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a record, evicting the oldest once over capacity
    pub fn push(&mut self, description: impl Into<String>) {
        let record = OperationRecord::new(description);
        tracing::debug!("Operation: {}", record.description);
        self.records.push_back(record);
        if self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Remove and return the most recent record
    pub fn pop(&mut self) -> Option<OperationRecord> {
        self.records.pop_back()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&OperationRecord> {
        self.records.back()
    }

    /// Numbered listing, most recent first
    pub fn display(&self) -> String {
        if self.is_empty() {
            return "Operation history is empty".to_string();
        }

        let mut out = String::from("Recent Operations:");
        for (i, record) in self.entries().enumerate() {
            let _ = write!(out, "\n  {}. {}", i + 1, record);
        }
        out
    }
}
