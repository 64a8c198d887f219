use serde::Serialize;
use std::collections::HashMap;
use std::ops::Index;

use super::store::NamingStore;
use crate::core::error::Result;
use crate::diff::{compute_diff_with, DiffStrategy, RenameResult};
use crate::sequence::{RenameOperationSequence, RenameResultSequence};

/// Something worth checking before applying a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewWarning {
    /// The final name is empty
    EmptyName,

    /// Another row ends up with the same name in the same scope
    DuplicateName { conflicts_with: Vec<usize> },

    /// The host refuses the final name
    InvalidName { reason: String },
}

impl PreviewWarning {
    pub fn message(&self) -> String {
        match self {
            PreviewWarning::EmptyName => "Name is empty".to_string(),
            PreviewWarning::DuplicateName { conflicts_with } => {
                let rows: Vec<String> = conflicts_with.iter().map(|i| i.to_string()).collect();
                format!("Name collides with entry {}", rows.join(", "))
            }
            PreviewWarning::InvalidName { reason } => format!("Invalid name: {}", reason),
        }
    }
}

/// One row of a bulk preview
#[derive(Debug, Clone, Serialize)]
pub struct RenamePreview {
    pub index: usize,
    pub result: RenameResultSequence,
    pub warnings: Vec<PreviewWarning>,
}

impl RenamePreview {
    pub fn original_name(&self) -> String {
        self.result.original_name()
    }

    pub fn new_name(&self) -> String {
        self.result.new_name()
    }

    pub fn is_changed(&self) -> bool {
        self.result.is_changed()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Single diff from the original name straight to the final one
    pub fn summary_diff(&self, strategy: DiffStrategy) -> RenameResult {
        compute_diff_with(&self.original_name(), &self.new_name(), strategy)
    }
}

/// Preview of a whole batch, one row per input name in batch order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkRenamePreview {
    entries: Vec<RenamePreview>,
}

impl BulkRenamePreview {
    pub fn generate<S: AsRef<str>>(names: &[S], sequence: &RenameOperationSequence) -> Self {
        Self::build(names, None, sequence, None)
    }

    /// Like `generate`, but non-empty final names also go through `validator`
    pub fn generate_with_validator<S, F>(
        names: &[S],
        sequence: &RenameOperationSequence,
        validator: F,
    ) -> Self
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let validator: &dyn Fn(&str) -> Option<String> = &validator;
        Self::build(names, None, sequence, Some(validator))
    }

    /// Preview the current names of `entities`, checking duplicates per store
    /// scope and validating with the store
    pub fn generate_for_store<T: NamingStore>(
        store: &T,
        entities: &[T::Entity],
        sequence: &RenameOperationSequence,
    ) -> Result<Self> {
        let names = entities
            .iter()
            .map(|entity| store.name(entity))
            .collect::<Result<Vec<_>>>()?;
        let scopes: Vec<String> = entities.iter().map(|entity| store.scope(entity)).collect();
        let validator = |name: &str| store.validate_name(name);
        let validator: &dyn Fn(&str) -> Option<String> = &validator;

        Ok(Self::build(&names, Some(scopes.as_slice()), sequence, Some(validator)))
    }

    fn build<S: AsRef<str>>(
        names: &[S],
        scopes: Option<&[String]>,
        sequence: &RenameOperationSequence,
        validator: Option<&dyn Fn(&str) -> Option<String>>,
    ) -> Self {
        let mut entries: Vec<RenamePreview> = names
            .iter()
            .enumerate()
            .map(|(index, name)| RenamePreview {
                index,
                result: sequence.rename_preview(name.as_ref(), index),
                warnings: Vec::new(),
            })
            .collect();

        let mut by_name: HashMap<(&str, String), Vec<usize>> = HashMap::new();
        for entry in &entries {
            let new_name = entry.new_name();
            if new_name.is_empty() {
                continue;
            }
            let scope = scopes
                .and_then(|s| s.get(entry.index))
                .map(String::as_str)
                .unwrap_or("");
            by_name.entry((scope, new_name)).or_default().push(entry.index);
        }

        let mut duplicates: HashMap<usize, Vec<usize>> = HashMap::new();
        for rows in by_name.values().filter(|rows| rows.len() > 1) {
            for &row in rows {
                let others = rows.iter().copied().filter(|&other| other != row).collect();
                duplicates.insert(row, others);
            }
        }

        for entry in &mut entries {
            let new_name = entry.new_name();
            if new_name.is_empty() {
                entry.warnings.push(PreviewWarning::EmptyName);
                continue;
            }

            if let Some(conflicts_with) = duplicates.remove(&entry.index) {
                entry
                    .warnings
                    .push(PreviewWarning::DuplicateName { conflicts_with });
            }

            if let Some(reason) = validator.and_then(|validate| validate(&new_name)) {
                entry.warnings.push(PreviewWarning::InvalidName { reason });
            }
        }

        Self { entries }
    }

    pub fn get(&self, index: usize) -> Option<&RenamePreview> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenamePreview> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[RenamePreview] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(RenamePreview::has_warnings)
    }

    pub fn warning_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.warnings.len()).sum()
    }

    pub fn changed_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_changed()).count()
    }
}

impl Index<usize> for BulkRenamePreview {
    type Output = RenamePreview;

    fn index(&self, index: usize) -> &RenamePreview {
        match self.entries.get(index) {
            Some(entry) => entry,
            None => panic!(
                "preview row {} out of range for batch of {}",
                index,
                self.entries.len()
            ),
        }
    }
}

impl<'a> IntoIterator for &'a BulkRenamePreview {
    type Item = &'a RenamePreview;
    type IntoIter = std::slice::Iter<'a, RenamePreview>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
