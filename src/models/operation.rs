//! Operation history record

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Description of one completed action
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

impl OperationRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
