use serde::{Deserialize, Serialize};

use crate::diff::RenameResult;

/// Add one string from a list, cycling through it by batch position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddStringSequenceOperation {
    pub sequence: Vec<String>,
    pub prepend: bool,
}

impl AddStringSequenceOperation {
    pub fn new<I, S>(sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sequence: sequence.into_iter().map(Into::into).collect(),
            prepend: false,
        }
    }

    pub fn prepended(mut self) -> Self {
        self.prepend = true;
        self
    }

    pub fn rename(&self, name: &str, index: usize) -> RenameResult {
        if self.sequence.is_empty() {
            return RenameResult::unchanged(name);
        }

        let value = &self.sequence[index % self.sequence.len()];
        let mut result = RenameResult::new();

        if self.prepend {
            result.push_insertion(value);
            result.push_equal(name);
        } else {
            result.push_equal(name);
            result.push_insertion(value);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_sequence() {
        let op = AddStringSequenceOperation::new(["_L", "_R"]);
        assert_eq!(op.rename("Arm", 0).new_name(), "Arm_L");
        assert_eq!(op.rename("Arm", 1).new_name(), "Arm_R");
        assert_eq!(op.rename("Arm", 2).new_name(), "Arm_L");
    }

    #[test]
    fn test_prepend() {
        let op = AddStringSequenceOperation::new(["Left", "Right"]).prepended();
        assert_eq!(op.rename("Arm", 1).new_name(), "RightArm");
    }

    #[test]
    fn test_empty_sequence_is_noop() {
        let op = AddStringSequenceOperation::default();
        assert!(op.rename("Arm", 3).is_unchanged());
    }
}
