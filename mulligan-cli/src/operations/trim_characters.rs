use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Delete a number of characters from the front and back of the name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimCharactersOperation {
    pub num_front_delete_chars: i64,
    pub num_back_delete_chars: i64,
}

impl TrimCharactersOperation {
    pub fn new(num_front_delete_chars: i64, num_back_delete_chars: i64) -> Self {
        Self {
            num_front_delete_chars,
            num_back_delete_chars,
        }
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        let chars: Vec<char> = name.chars().collect();
        let front = clamp_count(self.num_front_delete_chars);
        let back = clamp_count(self.num_back_delete_chars);

        if front.saturating_add(back) >= chars.len() {
            let mut result = RenameResult::new();
            result.push_deletion(name);
            return result;
        }

        let back_start = chars.len() - back;
        let mut result = RenameResult::new();
        result.push_deletion(&chars[..front].iter().collect::<String>());
        result.push_equal(&chars[front..back_start].iter().collect::<String>());
        result.push_deletion(&chars[back_start..].iter().collect::<String>());
        result
    }
}

fn clamp_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}
