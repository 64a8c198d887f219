use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Replace every occurrence of a literal string or regex pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceStringOperation {
    pub search_string: String,

    /// Replacement text; in regex mode `$1` and `${name}` expand captures
    pub replacement_string: String,

    pub use_regex: bool,

    pub search_is_case_sensitive: bool,
}

impl Default for ReplaceStringOperation {
    fn default() -> Self {
        Self {
            search_string: String::new(),
            replacement_string: String::new(),
            use_regex: false,
            search_is_case_sensitive: false,
        }
    }
}

impl ReplaceStringOperation {
    pub fn new(search_string: impl Into<String>, replacement_string: impl Into<String>) -> Self {
        Self {
            search_string: search_string.into(),
            replacement_string: replacement_string.into(),
            ..Self::default()
        }
    }

    pub fn regex(pattern: impl Into<String>, replacement_string: impl Into<String>) -> Self {
        Self {
            use_regex: true,
            ..Self::new(pattern, replacement_string)
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.search_is_case_sensitive = case_sensitive;
        self
    }

    fn build_matcher(&self) -> Result<Regex, regex::Error> {
        let pattern = if self.use_regex {
            self.search_string.clone()
        } else {
            regex::escape(&self.search_string)
        };

        RegexBuilder::new(&pattern)
            .case_insensitive(!self.search_is_case_sensitive)
            .build()
    }

    pub fn error_message(&self) -> Option<String> {
        if self.search_string.is_empty() {
            return None;
        }

        self.build_matcher()
            .err()
            .map(|e| format!("Invalid regex pattern '{}': {}", self.search_string, e))
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        if self.search_string.is_empty() {
            return RenameResult::unchanged(name);
        }

        let Ok(matcher) = self.build_matcher() else {
            return RenameResult::unchanged(name);
        };

        let mut result = RenameResult::new();
        let mut last_end = 0;

        for captures in matcher.captures_iter(name) {
            let Some(whole) = captures.get(0) else {
                continue;
            };

            let replacement = if self.use_regex {
                let mut expanded = String::new();
                captures.expand(&self.replacement_string, &mut expanded);
                expanded
            } else {
                self.replacement_string.clone()
            };

            result.push_equal(&name[last_end..whole.start()]);
            result.push_deletion(whole.as_str());
            result.push_insertion(&replacement);
            last_end = whole.end();
        }

        result.push_equal(&name[last_end..]);
        result
    }
}
