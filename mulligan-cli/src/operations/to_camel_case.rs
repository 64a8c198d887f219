use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Capitalize the first letter of every delimited word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToCamelCaseOperation {
    /// Characters that separate words; they are kept in the name
    pub delimiter_characters: String,

    /// Upper-case the first character (`HeroIdle`) instead of lower-casing it (`heroIdle`)
    pub use_pascal_casing: bool,
}

impl Default for ToCamelCaseOperation {
    fn default() -> Self {
        Self {
            delimiter_characters: " -_".to_string(),
            use_pascal_casing: true,
        }
    }
}

impl ToCamelCaseOperation {
    pub fn with_delimiters(delimiter_characters: impl Into<String>) -> Self {
        Self {
            delimiter_characters: delimiter_characters.into(),
            ..Self::default()
        }
    }

    pub fn lower_first(mut self) -> Self {
        self.use_pascal_casing = false;
        self
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        let mut result = RenameResult::new();
        let mut word_start = false;

        for (i, ch) in name.chars().enumerate() {
            if self.delimiter_characters.contains(ch) {
                result.push_equal(&ch.to_string());
                word_start = true;
                continue;
            }

            let original = ch.to_string();
            let converted: String = if i == 0 && !self.use_pascal_casing {
                ch.to_lowercase().collect()
            } else if i == 0 || word_start {
                ch.to_uppercase().collect()
            } else {
                original.clone()
            };
            word_start = false;

            if converted == original {
                result.push_equal(&original);
            } else {
                result.push_deletion(&original);
                result.push_insertion(&converted);
            }
        }

        result
    }
}
