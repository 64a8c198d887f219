use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Add a letter counter (A, B, ... Z, AA, AB, ...) derived from the batch position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountByLetterOperation {
    /// Symbols the counter is built from, in order
    pub count_sequence: Vec<String>,
    pub starting_count: i64,
    pub increment: i64,
    pub prepend: bool,

    /// Wrap around the sequence instead of growing to longer combinations
    pub do_not_carry_over: bool,
}

impl Default for CountByLetterOperation {
    fn default() -> Self {
        Self::uppercase_alphabet()
    }
}

impl CountByLetterOperation {
    pub fn with_sequence<I, S>(count_sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            count_sequence: count_sequence.into_iter().map(Into::into).collect(),
            starting_count: 0,
            increment: 1,
            prepend: false,
            do_not_carry_over: false,
        }
    }

    pub fn uppercase_alphabet() -> Self {
        Self::with_sequence(('A'..='Z').map(String::from))
    }

    pub fn lowercase_alphabet() -> Self {
        Self::with_sequence(('a'..='z').map(String::from))
    }

    /// Build a sequence from a comma-separated list such as `"x,y,z"`
    pub fn custom(list: &str) -> Self {
        Self::with_sequence(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn count_for(&self, index: usize) -> i64 {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        self.starting_count
            .saturating_add(index.saturating_mul(self.increment))
    }

    /// The counter text for a raw count
    pub fn letters_for(&self, count: i64) -> String {
        if self.error_message().is_some() {
            return String::new();
        }
        let base = self.count_sequence.len() as i64;

        if self.do_not_carry_over {
            return self.count_sequence[count.rem_euclid(base) as usize].clone();
        }

        if count < 0 {
            return String::new();
        }

        // Bijective base-N numbering, like spreadsheet column names
        let mut digits = Vec::new();
        let mut remaining = count;
        loop {
            digits.push(self.count_sequence[(remaining % base) as usize].as_str());
            remaining = remaining / base - 1;
            if remaining < 0 {
                break;
            }
        }

        digits.reverse();
        digits.concat()
    }

    pub fn error_message(&self) -> Option<String> {
        match self.count_sequence.len() {
            0 => Some("Count sequence is empty".to_string()),
            1 if !self.do_not_carry_over => Some(
                "Count sequence needs at least two symbols unless it wraps around".to_string(),
            ),
            _ => None,
        }
    }

    pub fn rename(&self, name: &str, index: usize) -> RenameResult {
        let letters = self.letters_for(self.count_for(index));
        let mut result = RenameResult::new();

        if self.prepend {
            result.push_insertion(&letters);
            result.push_equal(name);
        } else {
            result.push_equal(name);
            result.push_insertion(&letters);
        }

        result
    }
}
