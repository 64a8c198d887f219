//! Rename operations
//!
//! Every operation is a pure `(name, index) -> RenameResult` transform. The
//! [`RenameOperation`] enum closes over all kinds; its serialized form is
//! tagged with the kind key (`type = "enumerate"`), which is what presets and
//! sequence files store.

mod add_string;
mod add_string_sequence;
mod adjust_numbering;
mod change_case;
mod count_by_letter;
mod enumerate;
pub mod format;
mod remove_characters;
mod replace_name;
mod replace_string;
mod to_camel_case;
mod trim_characters;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::diff::RenameResult;

pub use add_string::AddStringOperation;
pub use add_string_sequence::AddStringSequenceOperation;
pub use adjust_numbering::AdjustNumberingOperation;
pub use change_case::{Casing, ChangeCaseOperation};
pub use count_by_letter::CountByLetterOperation;
pub use enumerate::EnumerateOperation;
pub use remove_characters::{RemoveCharactersOperation, RemovePreset};
pub use replace_name::ReplaceNameOperation;
pub use replace_string::ReplaceStringOperation;
pub use to_camel_case::ToCamelCaseOperation;
pub use trim_characters::TrimCharactersOperation;

/// One configured step of a rename pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenameOperation {
    ReplaceString(ReplaceStringOperation),
    ReplaceName(ReplaceNameOperation),
    AddString(AddStringOperation),
    AddStringSequence(AddStringSequenceOperation),
    Enumerate(EnumerateOperation),
    CountByLetter(CountByLetterOperation),
    ChangeCase(ChangeCaseOperation),
    ToCamelCase(ToCamelCaseOperation),
    AdjustNumbering(AdjustNumberingOperation),
    TrimCharacters(TrimCharactersOperation),
    RemoveCharacters(RemoveCharactersOperation),
}

impl RenameOperation {
    /// Apply this operation to one name at a batch position
    pub fn rename(&self, name: &str, index: usize) -> RenameResult {
        match self {
            RenameOperation::ReplaceString(op) => op.rename(name, index),
            RenameOperation::ReplaceName(op) => op.rename(name, index),
            RenameOperation::AddString(op) => op.rename(name, index),
            RenameOperation::AddStringSequence(op) => op.rename(name, index),
            RenameOperation::Enumerate(op) => op.rename(name, index),
            RenameOperation::CountByLetter(op) => op.rename(name, index),
            RenameOperation::ChangeCase(op) => op.rename(name, index),
            RenameOperation::ToCamelCase(op) => op.rename(name, index),
            RenameOperation::AdjustNumbering(op) => op.rename(name, index),
            RenameOperation::TrimCharacters(op) => op.rename(name, index),
            RenameOperation::RemoveCharacters(op) => op.rename(name, index),
        }
    }

    /// Why the current configuration cannot be applied, if it cannot
    pub fn error_message(&self) -> Option<String> {
        match self {
            RenameOperation::ReplaceString(op) => op.error_message(),
            RenameOperation::Enumerate(op) => op.error_message(),
            RenameOperation::CountByLetter(op) => op.error_message(),
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_message().is_some()
    }

    pub fn kind(&self) -> RenameOperationKind {
        match self {
            RenameOperation::ReplaceString(_) => RenameOperationKind::ReplaceString,
            RenameOperation::ReplaceName(_) => RenameOperationKind::ReplaceName,
            RenameOperation::AddString(_) => RenameOperationKind::AddString,
            RenameOperation::AddStringSequence(_) => RenameOperationKind::AddStringSequence,
            RenameOperation::Enumerate(_) => RenameOperationKind::Enumerate,
            RenameOperation::CountByLetter(_) => RenameOperationKind::CountByLetter,
            RenameOperation::ChangeCase(_) => RenameOperationKind::ChangeCase,
            RenameOperation::ToCamelCase(_) => RenameOperationKind::ToCamelCase,
            RenameOperation::AdjustNumbering(_) => RenameOperationKind::AdjustNumbering,
            RenameOperation::TrimCharacters(_) => RenameOperationKind::TrimCharacters,
            RenameOperation::RemoveCharacters(_) => RenameOperationKind::RemoveCharacters,
        }
    }
}

macro_rules! impl_from_operation {
    ($($variant:ident($op:ty)),* $(,)?) => {
        $(
            impl From<$op> for RenameOperation {
                fn from(op: $op) -> Self {
                    RenameOperation::$variant(op)
                }
            }
        )*
    };
}

impl_from_operation!(
    ReplaceString(ReplaceStringOperation),
    ReplaceName(ReplaceNameOperation),
    AddString(AddStringOperation),
    AddStringSequence(AddStringSequenceOperation),
    Enumerate(EnumerateOperation),
    CountByLetter(CountByLetterOperation),
    ChangeCase(ChangeCaseOperation),
    ToCamelCase(ToCamelCaseOperation),
    AdjustNumbering(AdjustNumberingOperation),
    TrimCharacters(TrimCharactersOperation),
    RemoveCharacters(RemoveCharactersOperation),
);

/// Tag for each operation kind, used for listings and templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenameOperationKind {
    ReplaceString,
    ReplaceName,
    AddString,
    AddStringSequence,
    Enumerate,
    CountByLetter,
    ChangeCase,
    ToCamelCase,
    AdjustNumbering,
    TrimCharacters,
    RemoveCharacters,
}

impl RenameOperationKind {
    pub const ALL: [RenameOperationKind; 11] = [
        RenameOperationKind::ReplaceString,
        RenameOperationKind::ReplaceName,
        RenameOperationKind::AddString,
        RenameOperationKind::AddStringSequence,
        RenameOperationKind::Enumerate,
        RenameOperationKind::CountByLetter,
        RenameOperationKind::ChangeCase,
        RenameOperationKind::ToCamelCase,
        RenameOperationKind::AdjustNumbering,
        RenameOperationKind::TrimCharacters,
        RenameOperationKind::RemoveCharacters,
    ];

    /// Key used in serialized sequences
    pub fn key(&self) -> &'static str {
        match self {
            RenameOperationKind::ReplaceString => "replace_string",
            RenameOperationKind::ReplaceName => "replace_name",
            RenameOperationKind::AddString => "add_string",
            RenameOperationKind::AddStringSequence => "add_string_sequence",
            RenameOperationKind::Enumerate => "enumerate",
            RenameOperationKind::CountByLetter => "count_by_letter",
            RenameOperationKind::ChangeCase => "change_case",
            RenameOperationKind::ToCamelCase => "to_camel_case",
            RenameOperationKind::AdjustNumbering => "adjust_numbering",
            RenameOperationKind::TrimCharacters => "trim_characters",
            RenameOperationKind::RemoveCharacters => "remove_characters",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RenameOperationKind::ReplaceString => "Replace String",
            RenameOperationKind::ReplaceName => "Replace Name",
            RenameOperationKind::AddString => "Add Prefix or Suffix",
            RenameOperationKind::AddStringSequence => "Add String Sequence",
            RenameOperationKind::Enumerate => "Enumerate",
            RenameOperationKind::CountByLetter => "Count By Letter",
            RenameOperationKind::ChangeCase => "Change Case",
            RenameOperationKind::ToCamelCase => "To Camel Case",
            RenameOperationKind::AdjustNumbering => "Adjust Numbering",
            RenameOperationKind::TrimCharacters => "Trim Characters",
            RenameOperationKind::RemoveCharacters => "Remove Characters",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RenameOperationKind::ReplaceString => "Replace matches of a string or regex",
            RenameOperationKind::ReplaceName => "Replace the whole name",
            RenameOperationKind::AddString => "Add a prefix and/or suffix",
            RenameOperationKind::AddStringSequence => "Add strings from a list, one per entry",
            RenameOperationKind::Enumerate => "Add a formatted counter",
            RenameOperationKind::CountByLetter => "Add a letter counter (A, B, ... AA)",
            RenameOperationKind::ChangeCase => "Convert to upper or lower case",
            RenameOperationKind::ToCamelCase => "Capitalize the first letter of each word",
            RenameOperationKind::AdjustNumbering => "Shift embedded numbers by an offset",
            RenameOperationKind::TrimCharacters => "Delete characters from the front or back",
            RenameOperationKind::RemoveCharacters => "Strip symbols, numbers, whitespace or a custom set",
        }
    }

    /// A freshly configured operation of this kind
    pub fn default_operation(&self) -> RenameOperation {
        match self {
            RenameOperationKind::ReplaceString => ReplaceStringOperation::default().into(),
            RenameOperationKind::ReplaceName => ReplaceNameOperation::default().into(),
            RenameOperationKind::AddString => AddStringOperation::default().into(),
            RenameOperationKind::AddStringSequence => AddStringSequenceOperation::default().into(),
            RenameOperationKind::Enumerate => EnumerateOperation::default().into(),
            RenameOperationKind::CountByLetter => CountByLetterOperation::default().into(),
            RenameOperationKind::ChangeCase => ChangeCaseOperation::default().into(),
            RenameOperationKind::ToCamelCase => ToCamelCaseOperation::default().into(),
            RenameOperationKind::AdjustNumbering => AdjustNumberingOperation::default().into(),
            RenameOperationKind::TrimCharacters => TrimCharactersOperation::default().into(),
            RenameOperationKind::RemoveCharacters => RemoveCharactersOperation::default().into(),
        }
    }
}

impl fmt::Display for RenameOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RenameOperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        RenameOperationKind::ALL
            .iter()
            .find(|kind| kind.key() == key)
            .copied()
            .ok_or_else(|| {
                let keys: Vec<&str> = RenameOperationKind::ALL.iter().map(|k| k.key()).collect();
                format!("Unknown operation '{}'. Expected one of: {}", s, keys.join(", "))
            })
    }
}
