use serde::{Deserialize, Serialize};

use crate::diff::{compute_diff, RenameResult};

/// Shift every number embedded in the name by a fixed offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustNumberingOperation {
    pub offset: i64,
}

impl AdjustNumberingOperation {
    pub fn new(offset: i64) -> Self {
        Self { offset }
    }

    pub fn rename(&self, name: &str, _index: usize) -> RenameResult {
        if self.offset == 0 {
            return RenameResult::unchanged(name);
        }

        let mut result = RenameResult::new();
        let mut run_start: Option<usize> = None;

        for (i, ch) in name.char_indices() {
            match (ch.is_ascii_digit(), run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    result.extend(self.adjust_run(&name[start..i]));
                    result.push_equal(&ch.to_string());
                    run_start = None;
                }
                (false, None) => result.push_equal(&ch.to_string()),
                (true, Some(_)) => {}
            }
        }

        if let Some(start) = run_start {
            result.extend(self.adjust_run(&name[start..]));
        }

        result
    }

    fn adjust_run(&self, digits: &str) -> RenameResult {
        let adjusted = digits
            .parse::<i64>()
            .ok()
            .and_then(|value| value.checked_add(self.offset));

        match adjusted {
            Some(value) => compute_diff(digits, &value.to_string()),
            // Runs too long for an i64 are left alone
            None => RenameResult::unchanged(digits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decrement_last_digit() {
        let op = AdjustNumberingOperation::new(-1);
        let result = op.rename("123", 0);

        assert_eq!(
            result.diffs(),
            &[Diff::equal("12"), Diff::deletion("3"), Diff::insertion("2")]
        );
        assert_eq!(result.new_name(), "122");
    }

    #[test]
    fn test_run_shrinks() {
        let op = AdjustNumberingOperation::new(-4);
        let result = op.rename("12", 0);

        assert_eq!(
            result.diffs(),
            &[Diff::deletion("1"), Diff::insertion("8"), Diff::deletion("2")]
        );
        assert_eq!(result.new_name(), "8");
    }

    #[test]
    fn test_every_run_adjusted() {
        let op = AdjustNumberingOperation::new(10);
        assert_eq!(op.rename("Tile_3x95_v1", 0).new_name(), "Tile_13x105_v11");
    }

    #[test]
    fn test_run_grows() {
        let op = AdjustNumberingOperation::new(1);
        let result = op.rename("Hero9", 0);
        assert_eq!(
            result.diffs(),
            &[Diff::equal("Hero"), Diff::deletion("9"), Diff::insertion("10")]
        );
    }

    #[test]
    fn test_no_numbers_or_zero_offset() {
        assert!(AdjustNumberingOperation::new(5).rename("Hero", 0).is_unchanged());
        assert!(AdjustNumberingOperation::new(0).rename("Hero007", 0).is_unchanged());
    }

    #[test]
    fn test_overflowing_run_untouched() {
        let op = AdjustNumberingOperation::new(1);
        let name = "id99999999999999999999";
        assert_eq!(op.rename(name, 0).new_name(), name);
    }
}
