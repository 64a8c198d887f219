use serde::{Deserialize, Serialize};

/// How a segment relates the original name to the new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOperation {
    /// Present in both names
    Equal,
    /// Present only in the original name
    Deletion,
    /// Present only in the new name
    Insertion,
}

impl DiffOperation {
    pub fn as_str(&self) -> &str {
        match self {
            DiffOperation::Equal => "equal",
            DiffOperation::Deletion => "deletion",
            DiffOperation::Insertion => "insertion",
        }
    }

    /// Whether the segment belongs to the original name
    pub fn in_original(&self) -> bool {
        matches!(self, DiffOperation::Equal | DiffOperation::Deletion)
    }

    /// Whether the segment belongs to the new name
    pub fn in_result(&self) -> bool {
        matches!(self, DiffOperation::Equal | DiffOperation::Insertion)
    }
}

/// A labeled run of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub text: String,
    pub operation: DiffOperation,
}

impl Diff {
    pub fn new(text: impl Into<String>, operation: DiffOperation) -> Self {
        Self {
            text: text.into(),
            operation,
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(text, DiffOperation::Equal)
    }

    pub fn deletion(text: impl Into<String>) -> Self {
        Self::new(text, DiffOperation::Deletion)
    }

    pub fn insertion(text: impl Into<String>) -> Self {
        Self::new(text, DiffOperation::Insertion)
    }
}

/// The diff produced by one rename stage for one name.
///
/// Segments are kept in order. Pushing a segment with the same operation as
/// the last one extends it, so a result never holds two adjacent segments of
/// the same kind, and empty segments are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameResult {
    diffs: Vec<Diff>,
}

impl RenameResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result that keeps `name` as is
    pub fn unchanged(name: &str) -> Self {
        let mut result = Self::new();
        result.push_equal(name);
        result
    }

    /// A result that swaps the whole of `old` for `new`
    pub fn replaced(old: &str, new: &str) -> Self {
        let mut result = Self::new();
        result.push_deletion(old);
        result.push_insertion(new);
        result
    }

    pub fn push(&mut self, diff: Diff) {
        if diff.text.is_empty() {
            return;
        }

        if let Some(last) = self.diffs.last_mut() {
            if last.operation == diff.operation {
                last.text.push_str(&diff.text);
                return;
            }
        }

        self.diffs.push(diff);
    }

    pub fn push_equal(&mut self, text: &str) {
        self.push(Diff::equal(text));
    }

    pub fn push_deletion(&mut self, text: &str) {
        self.push(Diff::deletion(text));
    }

    pub fn push_insertion(&mut self, text: &str) {
        self.push(Diff::insertion(text));
    }

    /// Append every segment of another result
    pub fn extend(&mut self, other: RenameResult) {
        for diff in other.diffs {
            self.push(diff);
        }
    }

    pub fn diffs(&self) -> &[Diff] {
        &self.diffs
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// The name before this stage (Equal + Deletion segments)
    pub fn original_name(&self) -> String {
        self.diffs
            .iter()
            .filter(|d| d.operation.in_original())
            .map(|d| d.text.as_str())
            .collect()
    }

    /// The name after this stage (Equal + Insertion segments)
    pub fn new_name(&self) -> String {
        self.diffs
            .iter()
            .filter(|d| d.operation.in_result())
            .map(|d| d.text.as_str())
            .collect()
    }

    pub fn is_unchanged(&self) -> bool {
        self.diffs
            .iter()
            .all(|d| d.operation == DiffOperation::Equal)
    }
}

impl From<Vec<Diff>> for RenameResult {
    fn from(diffs: Vec<Diff>) -> Self {
        let mut result = Self::new();
        for diff in diffs {
            result.push(diff);
        }
        result
    }
}
