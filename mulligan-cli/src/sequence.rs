//! Ordered rename pipelines
//!
//! A [`RenameOperationSequence`] feeds each stage's output name into the next
//! stage and records every stage's diff in a [`RenameResultSequence`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{MulliganError, Result};
use crate::diff::RenameResult;
use crate::operations::RenameOperation;

/// Per-stage results of running a sequence over one name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameResultSequence {
    input: String,
    stages: Vec<RenameResult>,
}

impl RenameResultSequence {
    pub fn new(input: impl Into<String>, stages: Vec<RenameResult>) -> Self {
        Self {
            input: input.into(),
            stages,
        }
    }

    pub fn stages(&self) -> &[RenameResult] {
        &self.stages
    }

    pub fn original_name(&self) -> String {
        match self.stages.first() {
            Some(first) => first.original_name(),
            None => self.input.clone(),
        }
    }

    pub fn new_name(&self) -> String {
        match self.stages.last() {
            Some(last) => last.new_name(),
            None => self.input.clone(),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.original_name() != self.new_name()
    }
}

/// An ordered list of rename operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperationSequence {
    #[serde(default)]
    operations: Vec<RenameOperation>,
}

impl RenameOperationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_operations(operations: Vec<RenameOperation>) -> Self {
        Self { operations }
    }

    /// Builder-style append
    pub fn push(mut self, operation: impl Into<RenameOperation>) -> Self {
        self.operations.push(operation.into());
        self
    }

    pub fn operations(&self) -> &[RenameOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run every operation in order over `name`; an empty sequence yields
    /// one unchanged stage
    pub fn rename_preview(&self, name: &str, index: usize) -> RenameResultSequence {
        if self.operations.is_empty() {
            return RenameResultSequence::new(name, vec![RenameResult::unchanged(name)]);
        }

        let mut stages = Vec::with_capacity(self.operations.len());
        let mut current = name.to_string();

        for (stage, operation) in self.operations.iter().enumerate() {
            let result = operation.rename(&current, index);
            current = result.new_name();
            debug!(
                "Stage {} ({}) on entry {}: '{}'",
                stage,
                operation.kind().key(),
                index,
                current
            );
            stages.push(result);
        }

        RenameResultSequence::new(name, stages)
    }

    /// The final name after every operation
    pub fn resulting_name(&self, name: &str, index: usize) -> String {
        self.operations
            .iter()
            .fold(name.to_string(), |current, operation| {
                operation.rename(&current, index).new_name()
            })
    }

    pub fn has_errors(&self) -> bool {
        self.operations.iter().any(RenameOperation::has_errors)
    }

    /// `(position, message)` for every operation in an error state
    pub fn errors(&self) -> Vec<(usize, String)> {
        self.operations
            .iter()
            .enumerate()
            .filter_map(|(i, op)| op.error_message().map(|message| (i, message)))
            .collect()
    }

    pub fn with_pushed(&self, operation: impl Into<RenameOperation>) -> Self {
        self.clone().push(operation)
    }

    pub fn with_inserted(&self, index: usize, operation: impl Into<RenameOperation>) -> Result<Self> {
        if index > self.operations.len() {
            return Err(self.out_of_range(index));
        }

        let mut operations = self.operations.clone();
        operations.insert(index, operation.into());
        Ok(Self { operations })
    }

    pub fn with_replaced(&self, index: usize, operation: impl Into<RenameOperation>) -> Result<Self> {
        self.check_index(index)?;

        let mut operations = self.operations.clone();
        operations[index] = operation.into();
        Ok(Self { operations })
    }

    pub fn without(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;

        let mut operations = self.operations.clone();
        operations.remove(index);
        Ok(Self { operations })
    }

    /// A new sequence with the operation at `from` moved to position `to`
    pub fn with_moved(&self, from: usize, to: usize) -> Result<Self> {
        self.check_index(from)?;
        self.check_index(to)?;

        let mut operations = self.operations.clone();
        let operation = operations.remove(from);
        operations.insert(to, operation);
        Ok(Self { operations })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.operations.len() {
            return Err(self.out_of_range(index));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> MulliganError {
        MulliganError::IndexOutOfRange {
            index,
            len: self.operations.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{
        AddStringOperation, Casing, ChangeCaseOperation, CountByLetterOperation,
        EnumerateOperation, ReplaceStringOperation, TrimCharactersOperation,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_matters() {
        let replace = ReplaceStringOperation::new("ar_He", "baboon");
        let trim = TrimCharactersOperation::new(4, 0);

        let replace_then_trim = RenameOperationSequence::new()
            .push(replace.clone())
            .push(trim.clone());
        let trim_then_replace = RenameOperationSequence::new().push(trim).push(replace);

        assert_eq!(
            replace_then_trim.resulting_name("Char_Hero_Idle", 0),
            "boonro_Idle"
        );
        assert_eq!(
            trim_then_replace.resulting_name("Char_Hero_Idle", 0),
            "_Hero_Idle"
        );
    }

    #[test]
    fn test_full_pipeline() {
        let sequence = RenameOperationSequence::new()
            .push(TrimCharactersOperation::new(1, 5))
            .push(ReplaceStringOperation::new("r_H", "t_Z"))
            .push(AddStringOperation::new("a_", "AA"))
            .push(EnumerateOperation::new("0000", 100));

        let preview = sequence.rename_preview("Char_Hero_Idle", 0);

        assert_eq!(preview.stages().len(), 4);
        assert_eq!(preview.original_name(), "Char_Hero_Idle");
        assert_eq!(preview.stages()[0].new_name(), "har_Hero");
        assert_eq!(preview.stages()[1].new_name(), "hat_Zero");
        assert_eq!(preview.stages()[2].new_name(), "a_hat_ZeroAA");
        assert_eq!(preview.new_name(), "a_hat_ZeroAA0100");
        assert_eq!(sequence.resulting_name("Char_Hero_Idle", 0), preview.new_name());
    }

    #[test]
    fn test_stages_chain_names() {
        let sequence = RenameOperationSequence::new()
            .push(ChangeCaseOperation::new(Casing::Upper))
            .push(CountByLetterOperation::uppercase_alphabet());

        let preview = sequence.rename_preview("row", 27);
        for pair in preview.stages().windows(2) {
            assert_eq!(pair[0].new_name(), pair[1].original_name());
        }
        assert_eq!(preview.new_name(), "ROWAB");
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        let sequence = RenameOperationSequence::new();
        for (i, name) in ["Hero", "", "Char_Hero_Idle"].iter().enumerate() {
            assert_eq!(sequence.resulting_name(name, i * 7), *name);

            let preview = sequence.rename_preview(name, i);
            assert_eq!(preview.stages().len(), 1);
            assert!(preview.stages()[0].is_unchanged());
            assert_eq!(preview.stages()[0].new_name(), *name);
            assert_eq!(preview.new_name(), *name);
            assert!(!preview.is_changed());
        }
    }

    #[test]
    fn test_editing_produces_new_sequences() {
        let base = RenameOperationSequence::new()
            .push(AddStringOperation::new("a", ""))
            .push(AddStringOperation::new("b", ""))
            .push(AddStringOperation::new("c", ""));
        assert_eq!(base.resulting_name("", 0), "cba");

        let moved = base.with_moved(0, 2).unwrap();
        assert_eq!(moved.resulting_name("", 0), "acb");
        assert_eq!(base.resulting_name("", 0), "cba");

        let removed = base.without(1).unwrap();
        assert_eq!(removed.resulting_name("", 0), "ca");

        let inserted = base.with_inserted(3, AddStringOperation::new("d", "")).unwrap();
        assert_eq!(inserted.resulting_name("", 0), "dcba");

        let replaced = base.with_replaced(2, AddStringOperation::new("z", "")).unwrap();
        assert_eq!(replaced.resulting_name("", 0), "zba");

        assert_eq!(base.with_pushed(AddStringOperation::new("e", "")).len(), 4);
    }

    #[test]
    fn test_out_of_range_edits() {
        let base = RenameOperationSequence::new().push(AddStringOperation::new("a", ""));

        assert!(matches!(
            base.without(1),
            Err(MulliganError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(base.with_moved(0, 5).is_err());
        assert!(base.with_inserted(2, AddStringOperation::default()).is_err());
        assert!(base.with_replaced(1, AddStringOperation::default()).is_err());
    }

    #[test]
    fn test_errors_listed_by_position() {
        let sequence = RenameOperationSequence::new()
            .push(AddStringOperation::new("a", ""))
            .push(ReplaceStringOperation::regex("(", "x"))
            .push(EnumerateOperation::new("Z1", 0));

        assert!(sequence.has_errors());
        let positions: Vec<usize> = sequence.errors().iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_toml_round_trip() {
        let sequence = RenameOperationSequence::new()
            .push(TrimCharactersOperation::new(1, 5))
            .push(ReplaceStringOperation::regex(r"(\d+)", "#$1").case_sensitive(true))
            .push(ChangeCaseOperation::new(Casing::Upper).first_character_only())
            .push(CountByLetterOperation::custom("x,y,z"))
            .push(EnumerateOperation::new("D3", -2).with_increment(3).prepended());

        let toml = sequence.to_toml_string().unwrap();
        assert!(toml.contains("type = \"trim_characters\""));

        let parsed = RenameOperationSequence::from_toml_str(&toml).unwrap();
        assert_eq!(parsed, sequence);

        let json = sequence.to_json_string().unwrap();
        assert_eq!(RenameOperationSequence::from_json_str(&json).unwrap(), sequence);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [[operations]]
            type = "enumerate"
            starting_count = 5

            [[operations]]
            type = "to_camel_case"
        "#;

        let sequence = RenameOperationSequence::from_toml_str(toml).unwrap();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.resulting_name("hero idle", 1), "Hero Idle6");
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let toml = r#"
            [[operations]]
            type = "shuffle"
        "#;
        assert!(RenameOperationSequence::from_toml_str(toml).is_err());
    }
}
