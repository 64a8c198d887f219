use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Which characters a remove operation strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePreset {
    /// Anything that is neither alphanumeric nor whitespace
    #[default]
    Symbols,
    /// ASCII digits
    Numbers,
    Whitespace,
    /// The characters listed in `custom_characters`
    Custom,
}

impl RemovePreset {
    pub fn as_str(&self) -> &str {
        match self {
            RemovePreset::Symbols => "symbols",
            RemovePreset::Numbers => "numbers",
            RemovePreset::Whitespace => "whitespace",
            RemovePreset::Custom => "custom",
        }
    }
}

/// Strip a class of characters from the name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveCharactersOperation {
    pub preset: RemovePreset,
    pub custom_characters: String,
    pub is_case_sensitive: bool,
}

impl RemoveCharactersOperation {
    pub fn new(preset: RemovePreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    pub fn custom(characters: impl Into<String>, is_case_sensitive: bool) -> Self {
        Self {
            preset: RemovePreset::Custom,
            custom_characters: characters.into(),
            is_case_sensitive,
        }
    }

    fn should_remove(&self, ch: char) -> bool {
        match self.preset {
            RemovePreset::Symbols => !ch.is_alphanumeric() && !ch.is_whitespace(),
            RemovePreset::Numbers => ch.is_ascii_digit(),
            RemovePreset::Whitespace => ch.is_whitespace(),
            RemovePreset::Custom => self.custom_characters.chars().any(|candidate| {
                candidate == ch
                    || (!self.is_case_sensitive && candidate.to_lowercase().eq(ch.to_lowercase()))
            }),
        }
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        let mut result = RenameResult::new();

        for ch in name.chars() {
            let text = ch.to_string();
            if self.should_remove(ch) {
                result.push_deletion(&text);
            } else {
                result.push_equal(&text);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_symbols() {
        let op = RemoveCharactersOperation::new(RemovePreset::Symbols);
        let result = op.rename("Hero (Copy)_01", 0);

        assert_eq!(
            result.diffs(),
            &[
                Diff::equal("Hero "),
                Diff::deletion("("),
                Diff::equal("Copy"),
                Diff::deletion(")_"),
                Diff::equal("01"),
            ]
        );
        assert_eq!(result.new_name(), "Hero Copy01");
    }

    #[test]
    fn test_remove_numbers_and_whitespace() {
        let numbers = RemoveCharactersOperation::new(RemovePreset::Numbers);
        assert_eq!(numbers.rename("Rock 12b3", 0).new_name(), "Rock b");

        let whitespace = RemoveCharactersOperation::new(RemovePreset::Whitespace);
        assert_eq!(whitespace.rename(" Big\tRock ", 0).new_name(), "BigRock");
    }

    #[test]
    fn test_custom_case_sensitivity() {
        let insensitive = RemoveCharactersOperation::custom("ae", false);
        assert_eq!(insensitive.rename("AbcdE", 0).new_name(), "bcd");

        let sensitive = RemoveCharactersOperation::custom("ae", true);
        assert_eq!(sensitive.rename("AbcdEa", 0).new_name(), "AbcdE");
    }

    #[test]
    fn test_empty_custom_set_is_noop() {
        let op = RemoveCharactersOperation::custom("", false);
        assert!(op.rename("Hero", 0).is_unchanged());
    }
}
