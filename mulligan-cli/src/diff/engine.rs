use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use super::result::RenameResult;

/// Algorithm used to compare two names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStrategy {
    /// Same-index character comparison
    #[default]
    Positional,
    /// Longest-common-subsequence comparison over characters
    Lcs,
}

impl DiffStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            DiffStrategy::Positional => "positional",
            DiffStrategy::Lcs => "lcs",
        }
    }
}

/// Compare two names character by character at the same positions.
///
/// Characters are never realigned: one character inserted near the start of
/// `modified` makes every later position a mismatch. Once one string runs
/// out, the rest of the other becomes a single Deletion or Insertion.
pub fn compute_diff(original: &str, modified: &str) -> RenameResult {
    let original: Vec<char> = original.chars().collect();
    let modified: Vec<char> = modified.chars().collect();

    let mut result = RenameResult::new();
    let mut equal = String::new();
    let longest = original.len().max(modified.len());

    let mut i = 0;
    while i < longest {
        if i >= modified.len() {
            flush_equal(&mut result, &mut equal);
            let rest: String = original[i..].iter().collect();
            result.push_deletion(&rest);
            break;
        }

        if i >= original.len() {
            flush_equal(&mut result, &mut equal);
            let rest: String = modified[i..].iter().collect();
            result.push_insertion(&rest);
            break;
        }

        if original[i] == modified[i] {
            equal.push(original[i]);
        } else {
            flush_equal(&mut result, &mut equal);
            result.push_deletion(&original[i].to_string());
            result.push_insertion(&modified[i].to_string());
        }

        i += 1;
    }

    flush_equal(&mut result, &mut equal);
    result
}

/// Compare two names with the given strategy
pub fn compute_diff_with(original: &str, modified: &str, strategy: DiffStrategy) -> RenameResult {
    match strategy {
        DiffStrategy::Positional => compute_diff(original, modified),
        DiffStrategy::Lcs => compute_lcs_diff(original, modified),
    }
}

fn compute_lcs_diff(original: &str, modified: &str) -> RenameResult {
    let diff = TextDiff::from_chars(original, modified);
    let mut result = RenameResult::new();

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => result.push_equal(change.value()),
            ChangeTag::Delete => result.push_deletion(change.value()),
            ChangeTag::Insert => result.push_insertion(change.value()),
        }
    }

    result
}

fn flush_equal(result: &mut RenameResult, equal: &mut String) {
    if !equal.is_empty() {
        result.push_equal(equal);
        equal.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_strings() {
        let result = compute_diff("Char_Hero", "Char_Hero");
        assert_eq!(result.diffs(), &[Diff::equal("Char_Hero")]);

        assert!(compute_diff("", "").is_empty());
    }

    #[test]
    fn test_single_mismatch() {
        let result = compute_diff("123", "122");
        assert_eq!(
            result.diffs(),
            &[Diff::equal("12"), Diff::deletion("3"), Diff::insertion("2")]
        );
    }

    #[test]
    fn test_modified_longer() {
        let result = compute_diff("Hero", "Heroes");
        assert_eq!(result.diffs(), &[Diff::equal("Hero"), Diff::insertion("es")]);
    }

    #[test]
    fn test_original_longer_merges_trailing_deletion() {
        let result = compute_diff("abcd", "ax");
        assert_eq!(
            result.diffs(),
            &[
                Diff::equal("a"),
                Diff::deletion("b"),
                Diff::insertion("x"),
                Diff::deletion("cd"),
            ]
        );

        let result = compute_diff("12", "8");
        assert_eq!(
            result.diffs(),
            &[Diff::deletion("1"), Diff::insertion("8"), Diff::deletion("2")]
        );
    }

    #[test]
    fn test_positional_does_not_realign() {
        let result = compute_diff("abc", "xabc");
        assert_eq!(
            result.diffs(),
            &[
                Diff::deletion("a"),
                Diff::insertion("x"),
                Diff::deletion("b"),
                Diff::insertion("a"),
                Diff::deletion("c"),
                Diff::insertion("bc"),
            ]
        );
        assert_eq!(result.original_name(), "abc");
        assert_eq!(result.new_name(), "xabc");
    }

    #[test]
    fn test_lcs_realigns() {
        let result = compute_diff_with("abc", "xabc", DiffStrategy::Lcs);
        assert_eq!(result.diffs(), &[Diff::insertion("x"), Diff::equal("abc")]);
    }

    #[test]
    fn test_reconstruction() {
        let pairs = [
            ("", "abc"),
            ("abc", ""),
            ("Char_Hero_Idle", "a_hat_ZeroAA0100"),
            ("héllo wörld", "hello world!"),
            ("same", "same"),
        ];

        for (original, modified) in pairs {
            for strategy in [DiffStrategy::Positional, DiffStrategy::Lcs] {
                let result = compute_diff_with(original, modified, strategy);
                assert_eq!(result.original_name(), original);
                assert_eq!(result.new_name(), modified);
            }
        }
    }
}
