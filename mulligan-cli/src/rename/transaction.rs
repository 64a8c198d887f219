use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::store::NamingStore;
use crate::core::error::MulliganError;
use crate::sequence::RenameOperationSequence;

const PLACEHOLDER_PREFIX: &str = "__mulligan_";

/// One rename: `entity` went from `old_name` to `new_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNameDelta<E> {
    pub entity: E,
    pub old_name: String,
    pub new_name: String,
}

impl<E: Clone> ObjectNameDelta<E> {
    pub fn new(entity: E, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            entity,
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// The delta that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            old_name: self.new_name.clone(),
            new_name: self.old_name.clone(),
        }
    }
}

/// Transaction execution mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionMode {
    /// Actually rename through the store
    Execute,

    /// Dry-run - compute deltas only
    DryRun,
}

impl Serialize for TransactionMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            TransactionMode::Execute => serializer.serialize_str("execute"),
            TransactionMode::DryRun => serializer.serialize_str("dry_run"),
        }
    }
}

/// A failed apply. Renames that already happened are kept and listed in
/// `applied` so they can be journaled or reverted.
#[derive(Error, Debug)]
#[error("Rename stopped with {} rename(s) already applied", .applied.len())]
pub struct ApplyError<E: Debug> {
    #[source]
    pub error: MulliganError,
    pub applied: Vec<ObjectNameDelta<E>>,
}

impl<E: Debug> ApplyError<E> {
    fn before_any_change(error: MulliganError) -> Self {
        Self {
            error,
            applied: Vec::new(),
        }
    }
}

/// Outcome of a committed transaction
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport<E> {
    pub mode: TransactionMode,

    /// Every rename performed (or, in dry-run, planned)
    pub deltas: Vec<ObjectNameDelta<E>>,

    /// How many entities went through a temporary name
    pub placeholders_used: usize,
}

impl<E> ApplyReport<E> {
    pub fn renamed_count(&self) -> usize {
        self.deltas.len()
    }

    /// Format result for display
    pub fn format_summary(&self) -> String {
        let mut output = String::new();

        output.push_str("========================================\n");
        output.push_str(if self.mode == TransactionMode::DryRun {
            "           DRY-RUN RENAME RESULT\n"
        } else {
            "              RENAME RESULT\n"
        });
        output.push_str("========================================\n\n");

        let verb = if self.mode == TransactionMode::DryRun {
            "would be renamed"
        } else {
            "renamed"
        };
        output.push_str(&format!(
            "✅ {} entr{} {}\n",
            self.deltas.len(),
            if self.deltas.len() == 1 { "y" } else { "ies" },
            verb
        ));

        if self.placeholders_used > 0 {
            output.push_str(&format!(
                "🔀 {} swapped through a temporary name\n",
                self.placeholders_used
            ));
        }

        if !self.deltas.is_empty() {
            output.push('\n');
            for delta in &self.deltas {
                output.push_str(&format!("   {} -> {}\n", delta.old_name, delta.new_name));
            }
        }

        output.push_str("\n========================================\n");
        output
    }
}

/// A batch of renames applied with two-phase conflict avoidance.
///
/// Deltas whose target is currently held by another entity of the batch are
/// parked on a placeholder name first, the rest are applied directly, and
/// the parked ones are then moved to their targets. This lets A and B swap
/// names without either rename being refused.
#[derive(Debug)]
pub struct RenameTransaction<E> {
    deltas: Vec<ObjectNameDelta<E>>,
    mode: TransactionMode,
    committed: bool,
}

impl<E: Clone + Debug> RenameTransaction<E> {
    pub fn new(mode: TransactionMode) -> Self {
        Self {
            deltas: Vec::new(),
            mode,
            committed: false,
        }
    }

    /// Compute the deltas for running `sequence` over `entities`, using each
    /// entity's position as its index. Unchanged names are skipped.
    pub fn plan<S>(
        store: &S,
        entities: &[E],
        sequence: &RenameOperationSequence,
        mode: TransactionMode,
    ) -> crate::core::error::Result<Self>
    where
        S: NamingStore<Entity = E>,
    {
        let mut transaction = Self::new(mode);

        for (index, entity) in entities.iter().enumerate() {
            let old_name = store.name(entity)?;
            let new_name = sequence.resulting_name(&old_name, index);
            transaction.add_delta(ObjectNameDelta::new(entity.clone(), old_name, new_name))?;
        }

        debug!(
            "Planned {} rename(s) out of {} entit(ies)",
            transaction.deltas.len(),
            entities.len()
        );
        Ok(transaction)
    }

    /// Queue a delta; a delta that does not change the name is dropped
    pub fn add_delta(&mut self, delta: ObjectNameDelta<E>) -> crate::core::error::Result<()> {
        if self.committed {
            return Err(MulliganError::Store(
                "Cannot add renames to a committed transaction".to_string(),
            ));
        }

        if delta.old_name != delta.new_name {
            self.deltas.push(delta);
        }
        Ok(())
    }

    pub fn deltas(&self) -> &[ObjectNameDelta<E>] {
        &self.deltas
    }

    pub fn mode(&self) -> TransactionMode {
        self.mode
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Apply every delta through `store`, calling `progress(done, total)`
    /// after each rename step
    pub fn commit<S>(
        &mut self,
        store: &mut S,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<ApplyReport<E>, ApplyError<E>>
    where
        S: NamingStore<Entity = E>,
    {
        if self.committed {
            return Err(ApplyError::before_any_change(MulliganError::Store(
                "Transaction has already been committed".to_string(),
            )));
        }

        self.preflight(store).map_err(ApplyError::before_any_change)?;

        let conflicting = self.conflicting(store);
        let placeholders_used = conflicting.iter().filter(|c| **c).count();

        if self.mode == TransactionMode::DryRun {
            self.committed = true;
            return Ok(ApplyReport {
                mode: self.mode,
                deltas: self.deltas.clone(),
                placeholders_used,
            });
        }

        let total = self.deltas.len() + placeholders_used;
        let mut done = 0;
        let mut applied = Vec::new();
        let mut parked: Vec<(usize, String)> = Vec::new();
        let mut failure = None;

        info!("Phase 1: parking {} conflicting rename(s)", placeholders_used);
        let reserved: HashSet<&str> = self.deltas.iter().map(|d| d.new_name.as_str()).collect();
        for (i, delta) in self.deltas.iter().enumerate() {
            if !conflicting[i] {
                continue;
            }

            let placeholder = placeholder_name(store, &delta.entity, &reserved);
            match store.set_name(&delta.entity, &placeholder) {
                Ok(()) => {
                    debug!("Parked '{}' as '{}'", delta.old_name, placeholder);
                    parked.push((i, placeholder));
                    done += 1;
                    progress(done, total);
                }
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        if failure.is_none() {
            info!(
                "Phase 2: applying {} direct rename(s)",
                self.deltas.len() - placeholders_used
            );
            for (i, delta) in self.deltas.iter().enumerate() {
                if conflicting[i] {
                    continue;
                }

                match store.set_name(&delta.entity, &delta.new_name) {
                    Ok(()) => {
                        applied.push(delta.clone());
                        done += 1;
                        progress(done, total);
                    }
                    Err(error) => {
                        failure = Some(error);
                        break;
                    }
                }
            }
        }

        info!("Phase 3: settling {} parked rename(s)", parked.len());
        for (i, placeholder) in parked {
            let delta = &self.deltas[i];
            match store.set_name(&delta.entity, &delta.new_name) {
                Ok(()) => {
                    applied.push(delta.clone());
                }
                Err(error) => {
                    warn!(
                        "Could not move '{}' to '{}': {}",
                        placeholder, delta.new_name, error
                    );
                    if store.set_name(&delta.entity, &delta.old_name).is_err() {
                        applied.push(ObjectNameDelta::new(
                            delta.entity.clone(),
                            delta.old_name.clone(),
                            placeholder,
                        ));
                    }
                    failure.get_or_insert(error);
                }
            }
            done += 1;
            progress(done, total);
        }

        self.committed = true;

        match failure {
            Some(error) => Err(ApplyError { error, applied }),
            None => Ok(ApplyReport {
                mode: self.mode,
                deltas: applied,
                placeholders_used,
            }),
        }
    }

    /// Reject batches that could never fully apply
    fn preflight<S>(&self, store: &S) -> crate::core::error::Result<()>
    where
        S: NamingStore<Entity = E>,
    {
        let mut targets: HashMap<(String, &str), &str> = HashMap::new();

        for delta in &self.deltas {
            if let Some(reason) = store.validate_name(&delta.new_name) {
                return Err(MulliganError::Store(format!(
                    "Cannot rename '{}' to '{}': {}",
                    delta.old_name, delta.new_name, reason
                )));
            }

            let key = (store.scope(&delta.entity), delta.new_name.as_str());
            if let Some(other) = targets.insert(key, &delta.old_name) {
                return Err(MulliganError::NameTaken(format!(
                    "{} (target of both '{}' and '{}')",
                    delta.new_name, other, delta.old_name
                )));
            }
        }

        Ok(())
    }

    /// For each delta, whether its target is the current name of another
    /// entity being renamed in the same scope
    fn conflicting<S>(&self, store: &S) -> Vec<bool>
    where
        S: NamingStore<Entity = E>,
    {
        let scopes: Vec<String> = self.deltas.iter().map(|d| store.scope(&d.entity)).collect();

        let mut holders: HashMap<(&str, &str), usize> = HashMap::new();
        for (i, delta) in self.deltas.iter().enumerate() {
            holders.insert((scopes[i].as_str(), delta.old_name.as_str()), i);
        }

        self.deltas
            .iter()
            .enumerate()
            .map(|(i, delta)| {
                holders
                    .get(&(scopes[i].as_str(), delta.new_name.as_str()))
                    .is_some_and(|&holder| holder != i)
            })
            .collect()
    }
}

/// Undo `deltas` by applying their inverses with the same two-phase algorithm
pub fn revert<S, E>(
    store: &mut S,
    deltas: &[ObjectNameDelta<E>],
    progress: impl FnMut(usize, usize),
) -> Result<ApplyReport<E>, ApplyError<E>>
where
    S: NamingStore<Entity = E>,
    E: Clone + Debug,
{
    let mut transaction = RenameTransaction::new(TransactionMode::Execute);
    for delta in deltas.iter().rev() {
        transaction
            .add_delta(delta.inverse())
            .map_err(ApplyError::before_any_change)?;
    }

    info!("Reverting {} rename(s)", transaction.deltas().len());
    transaction.commit(store, progress)
}

fn placeholder_name<S: NamingStore>(
    store: &S,
    entity: &S::Entity,
    reserved: &HashSet<&str>,
) -> String {
    let base = format!("{}{}", PLACEHOLDER_PREFIX, store.stable_id(entity));
    let free = |candidate: &str| {
        !reserved.contains(candidate) && !store.is_name_taken(entity, candidate)
    };

    if free(&base) {
        return base;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{}_{}", base, n);
        if free(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{EnumerateOperation, ReplaceNameOperation};
    use crate::rename::{EntryId, FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn swap(store: &MemoryStore) -> RenameTransaction<usize> {
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(0, store.names()[0].clone(), "B"))
            .unwrap();
        tx.add_delta(ObjectNameDelta::new(1, store.names()[1].clone(), "A"))
            .unwrap();
        tx
    }

    #[test]
    fn test_swap_names() {
        let mut store = MemoryStore::new(["A", "B"]);
        let mut tx = swap(&store);

        let mut steps = Vec::new();
        let report = tx.commit(&mut store, |done, total| steps.push((done, total))).unwrap();

        assert_eq!(store.names(), &["B".to_string(), "A".to_string()]);
        assert_eq!(report.placeholders_used, 2);
        assert_eq!(report.renamed_count(), 2);
        assert_eq!(steps, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert!(store
            .history()
            .iter()
            .any(|(_, _, new)| new == "__mulligan_0"));
    }

    #[test]
    fn test_chain_rename() {
        // A->B while B->C: only the first needs parking
        let mut store = MemoryStore::new(["A", "B"]);
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(0, "A", "B")).unwrap();
        tx.add_delta(ObjectNameDelta::new(1, "B", "C")).unwrap();

        let report = tx.commit(&mut store, |_, _| {}).unwrap();
        assert_eq!(store.names(), &["B".to_string(), "C".to_string()]);
        assert_eq!(report.placeholders_used, 1);
    }

    #[test]
    fn test_plan_skips_unchanged() {
        let store = MemoryStore::new(["Rock1", "Tree"]);
        let sequence = RenameOperationSequence::new().push(EnumerateOperation::new("0", 1));

        let tx = RenameTransaction::plan(
            &store,
            &store.entities(),
            &RenameOperationSequence::new(),
            TransactionMode::Execute,
        )
        .unwrap();
        assert!(tx.deltas().is_empty());

        let tx = RenameTransaction::plan(&store, &store.entities(), &sequence, TransactionMode::Execute)
            .unwrap();
        assert_eq!(
            tx.deltas(),
            &[
                ObjectNameDelta::new(0, "Rock1", "Rock11"),
                ObjectNameDelta::new(1, "Tree", "Tree2"),
            ]
        );
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let mut store = MemoryStore::new(["A", "B"]);
        let mut tx = swap(&store);
        tx.mode = TransactionMode::DryRun;

        let report = tx.commit(&mut store, |_, _| panic!("no progress in dry-run")).unwrap();
        assert_eq!(report.deltas.len(), 2);
        assert_eq!(store.names(), &["A".to_string(), "B".to_string()]);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_duplicate_targets_rejected_up_front() {
        let mut store = MemoryStore::new(["A", "B"]);
        let sequence = RenameOperationSequence::new().push(ReplaceNameOperation::new("Rock"));
        let mut tx =
            RenameTransaction::plan(&store, &store.entities(), &sequence, TransactionMode::Execute)
                .unwrap();

        let err = tx.commit(&mut store, |_, _| {}).unwrap_err();
        assert!(err.applied.is_empty());
        assert!(matches!(err.error, MulliganError::NameTaken(_)));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_failure_keeps_applied_renames() {
        // C is held by an entity outside the batch
        let mut store = MemoryStore::new(["A", "B", "C"]);
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(0, "A", "X")).unwrap();
        tx.add_delta(ObjectNameDelta::new(1, "B", "C")).unwrap();

        let err = tx.commit(&mut store, |_, _| {}).unwrap_err();
        assert_eq!(err.applied, vec![ObjectNameDelta::new(0, "A", "X")]);
        assert_eq!(store.names()[0], "X");
        assert_eq!(store.names()[1], "B");
        assert_eq!(
            err.to_string(),
            "Rename stopped with 1 rename(s) already applied"
        );

        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(!err.to_string().contains(&cause));
    }

    #[test]
    fn test_commit_twice_fails() {
        let mut store = MemoryStore::new(["A"]);
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(0, "A", "Z")).unwrap();
        tx.commit(&mut store, |_, _| {}).unwrap();

        assert!(tx.is_committed());
        assert!(tx.commit(&mut store, |_, _| {}).is_err());
        assert!(tx.add_delta(ObjectNameDelta::new(0, "Z", "Y")).is_err());
    }

    #[test]
    fn test_revert_restores_names() {
        let mut store = MemoryStore::new(["A", "B", "C"]);
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(0, "A", "B")).unwrap();
        tx.add_delta(ObjectNameDelta::new(1, "B", "C")).unwrap();
        tx.add_delta(ObjectNameDelta::new(2, "C", "A")).unwrap();
        let report = tx.commit(&mut store, |_, _| {}).unwrap();
        assert_eq!(store.names(), &["B", "C", "A"]);

        revert(&mut store, &report.deltas, |_, _| {}).unwrap();
        assert_eq!(store.names(), &["A", "B", "C"]);
    }

    #[test]
    fn test_placeholder_suffix_when_taken() {
        let store = MemoryStore::new(["A", "__mulligan_0"]);
        let reserved = HashSet::new();
        assert_eq!(placeholder_name(&store, &0, &reserved), "__mulligan_0_1");

        let reserved: HashSet<&str> = ["__mulligan_1"].into_iter().collect();
        assert_eq!(placeholder_name(&store, &1, &reserved), "__mulligan_1_1");
    }

    #[test]
    fn test_file_swap() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        fs::write(&a, "first").unwrap();
        fs::write(&b, "second").unwrap();

        let mut store = FileStore::from_paths(vec![a.clone(), b.clone()], false);
        let mut tx = RenameTransaction::new(TransactionMode::Execute);
        tx.add_delta(ObjectNameDelta::new(EntryId(0), "a", "b")).unwrap();
        tx.add_delta(ObjectNameDelta::new(EntryId(1), "b", "a")).unwrap();

        let report = tx.commit(&mut store, |_, _| {}).unwrap();
        assert_eq!(report.placeholders_used, 2);
        assert_eq!(fs::read_to_string(&a).unwrap(), "second");
        assert_eq!(fs::read_to_string(&b).unwrap(), "first");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_summary_mentions_renames() {
        let report = ApplyReport {
            mode: TransactionMode::DryRun,
            deltas: vec![ObjectNameDelta::new(0usize, "Rock", "Stone")],
            placeholders_used: 0,
        };

        let summary = report.format_summary();
        assert!(summary.contains("DRY-RUN"));
        assert!(summary.contains("1 entry would be renamed"));
        assert!(summary.contains("Rock -> Stone"));
    }
}
