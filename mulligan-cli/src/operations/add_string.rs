use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Add a prefix and/or suffix around the name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddStringOperation {
    pub prefix: String,
    pub suffix: String,
}

impl AddStringOperation {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        let mut result = RenameResult::new();
        result.push_insertion(&self.prefix);
        result.push_equal(name);
        result.push_insertion(&self.suffix);
        result
    }
}
