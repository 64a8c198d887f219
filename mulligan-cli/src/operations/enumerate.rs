use serde::{Deserialize, Serialize};

use super::format::NumberFormat;
use crate::diff::RenameResult;

/// Add a formatted counter derived from the batch position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerateOperation {
    /// Numeric format such as `0`, `0000` or `D4`
    pub count_format: String,
    pub starting_count: i64,
    pub increment: i64,
    pub prepend: bool,
}

impl Default for EnumerateOperation {
    fn default() -> Self {
        Self {
            count_format: "0".to_string(),
            starting_count: 0,
            increment: 1,
            prepend: false,
        }
    }
}

impl EnumerateOperation {
    pub fn new(count_format: impl Into<String>, starting_count: i64) -> Self {
        Self {
            count_format: count_format.into(),
            starting_count,
            ..Self::default()
        }
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }

    pub fn prepended(mut self) -> Self {
        self.prepend = true;
        self
    }

    pub fn count_for(&self, index: usize) -> i64 {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        self.starting_count
            .saturating_add(index.saturating_mul(self.increment))
    }

    pub fn error_message(&self) -> Option<String> {
        NumberFormat::parse(&self.count_format).err()
    }

    pub fn rename(&self, name: &str, index: usize) -> RenameResult {
        let Ok(format) = NumberFormat::parse(&self.count_format) else {
            return RenameResult::unchanged(name);
        };

        let count = format.format(self.count_for(index));
        let mut result = RenameResult::new();

        if self.prepend {
            result.push_insertion(&count);
            result.push_equal(name);
        } else {
            result.push_equal(name);
            result.push_insertion(&count);
        }

        result
    }
}
