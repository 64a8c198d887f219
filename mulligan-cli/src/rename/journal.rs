use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::fs_store::{EntryId, FileStore};
use super::transaction::ObjectNameDelta;
use crate::core::error::Result;

/// One file renamed by the last apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Where the file lives after the rename
    pub path: PathBuf,
    pub old_name: String,
    pub new_name: String,
}

/// Record of the last apply, enough to undo it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameJournal {
    pub include_extension: bool,
    pub entries: Vec<JournalEntry>,
}

impl RenameJournal {
    /// Build a journal from applied deltas; `store` must be the store they
    /// were applied through so paths reflect the new names
    pub fn from_deltas(store: &FileStore, deltas: &[ObjectNameDelta<EntryId>]) -> Result<Self> {
        let entries = deltas
            .iter()
            .map(|delta| {
                Ok(JournalEntry {
                    path: store.path(&delta.entity)?.to_path_buf(),
                    old_name: delta.old_name.clone(),
                    new_name: delta.new_name.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_extension: store.include_extension(),
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A store over the renamed files plus the deltas to revert
    pub fn to_store(&self) -> (FileStore, Vec<ObjectNameDelta<EntryId>>) {
        let paths = self.entries.iter().map(|e| e.path.clone()).collect();
        let deltas = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| ObjectNameDelta::new(EntryId(i), e.old_name.clone(), e.new_name.clone()))
            .collect();

        (FileStore::from_paths(paths, self.include_extension), deltas)
    }

    /// Load the journal, or `None` when nothing has been applied
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Save the journal atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write atomically: temp file + rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(temp_path, path)?;

        Ok(())
    }

    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::{revert, NamingStore};
    use tempfile::TempDir;

    #[test]
    fn test_journal_round_trip_and_undo() -> Result<()> {
        let temp = TempDir::new()?;
        let original = temp.path().join("rock.png");
        fs::write(&original, "")?;

        let mut store = FileStore::from_paths(vec![original.clone()], false);
        store.set_name(&EntryId(0), "stone")?;
        let deltas = vec![ObjectNameDelta::new(EntryId(0), "rock", "stone")];

        let journal_path = temp.path().join("state").join("journal.json");
        let journal = RenameJournal::from_deltas(&store, &deltas)?;
        assert_eq!(journal.entries[0].path, temp.path().join("stone.png"));
        journal.save(&journal_path)?;

        let loaded = RenameJournal::load(&journal_path)?.unwrap();
        assert_eq!(loaded, journal);

        let (mut store, deltas) = loaded.to_store();
        revert(&mut store, &deltas, |_, _| {}).unwrap();
        assert!(original.exists());

        RenameJournal::clear(&journal_path)?;
        assert!(RenameJournal::load(&journal_path)?.is_none());
        Ok(())
    }

    #[test]
    fn test_corrupted_journal_is_an_error() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("journal.json");
        fs::write(&path, "{ not json")?;

        assert!(RenameJournal::load(&path).is_err());
        Ok(())
    }
}
