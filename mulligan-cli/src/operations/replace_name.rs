use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Replace the whole name with a fixed one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceNameOperation {
    /// The new name; empty blanks the name
    pub new_name: String,
}

impl ReplaceNameOperation {
    pub fn new(new_name: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
        }
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        if name == self.new_name {
            return RenameResult::unchanged(name);
        }

        RenameResult::replaced(name, &self.new_name)
    }
}
