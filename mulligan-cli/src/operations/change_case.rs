use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Casing {
    #[default]
    Lower,
    Upper,
}

impl Casing {
    fn convert(&self, ch: char) -> String {
        match self {
            Casing::Lower => ch.to_lowercase().collect(),
            Casing::Upper => ch.to_uppercase().collect(),
        }
    }
}

/// Convert the name to upper or lower case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeCaseOperation {
    pub casing: Casing,
    pub change_first_character_only: bool,
}

impl ChangeCaseOperation {
    pub fn new(casing: Casing) -> Self {
        Self {
            casing,
            change_first_character_only: false,
        }
    }

    pub fn first_character_only(mut self) -> Self {
        self.change_first_character_only = true;
        self
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        let mut result = RenameResult::new();

        for (i, ch) in name.char_indices() {
            if self.change_first_character_only && i > 0 {
                result.push_equal(&name[i..]);
                break;
            }

            let original = ch.to_string();
            let converted = self.casing.convert(ch);
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
