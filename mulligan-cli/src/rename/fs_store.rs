use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::store::NamingStore;
use crate::core::error::{MulliganError, Result};

/// Handle for one file in a [`FileStore`]; stays valid across renames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub usize);

/// Which files a directory scan picks up
#[derive(Debug, Clone)]
pub struct FileSelection {
    /// Root path to search from
    pub root: PathBuf,

    /// File name glob (e.g. "*.png")
    pub glob: Option<String>,

    pub recursive: bool,

    pub include_hidden: bool,
}

impl FileSelection {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            glob: None,
            recursive: false,
            include_hidden: false,
        }
    }
}

/// Files on disk as a naming store.
///
/// Names are file stems unless `include_extension` is set, in which case the
/// whole file name is renamed.
#[derive(Debug, Clone)]
pub struct FileStore {
    entries: Vec<PathBuf>,
    include_extension: bool,
}

impl FileStore {
    pub fn from_paths(paths: Vec<PathBuf>, include_extension: bool) -> Self {
        Self {
            entries: paths,
            include_extension,
        }
    }

    /// Collect matching regular files, sorted by path for stable indices
    pub fn scan(selection: &FileSelection, include_extension: bool) -> Result<Self> {
        let pattern = match &selection.glob {
            Some(glob) => Some(
                Pattern::new(glob)
                    .map_err(|e| MulliganError::Config(format!("Invalid glob '{}': {}", glob, e)))?,
            ),
            None => None,
        };

        let max_depth = if selection.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(&selection.root)
            .follow_links(false)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !should_ignore(e.path(), selection.include_hidden))
        {
            let entry = entry.map_err(|e| MulliganError::Store(e.to_string()))?;
            if entry.file_type().is_file() && matches_pattern(entry.path(), pattern.as_ref()) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        debug!(
            "Selected {} file(s) under {}",
            files.len(),
            selection.root.display()
        );

        Ok(Self::from_paths(files, include_extension))
    }

    pub fn entities(&self) -> Vec<EntryId> {
        (0..self.entries.len()).map(EntryId).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current path of an entry
    pub fn path(&self, entity: &EntryId) -> Result<&Path> {
        self.entries
            .get(entity.0)
            .map(PathBuf::as_path)
            .ok_or_else(|| MulliganError::EntityNotFound(format!("entry {}", entity.0)))
    }

    pub fn include_extension(&self) -> bool {
        self.include_extension
    }

    fn target_path(&self, current: &Path, new_name: &str) -> PathBuf {
        let file_name = match current.extension() {
            Some(ext) if !self.include_extension => {
                format!("{}.{}", new_name, ext.to_string_lossy())
            }
            _ => new_name.to_string(),
        };
        current.with_file_name(file_name)
    }
}

impl NamingStore for FileStore {
    type Entity = EntryId;

    fn name(&self, entity: &EntryId) -> Result<String> {
        let path = self.path(entity)?;
        let name = if self.include_extension {
            path.file_name()
        } else {
            path.file_stem()
        };

        name.map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MulliganError::Store(format!("No file name in {}", path.display())))
    }

    fn set_name(&mut self, entity: &EntryId, new_name: &str) -> Result<()> {
        if let Some(reason) = self.validate_name(new_name) {
            return Err(MulliganError::Store(reason));
        }

        let current = self.path(entity)?.to_path_buf();
        let target = self.target_path(&current, new_name);
        if target == current {
            return Ok(());
        }

        if is_occupied(&current, &target) {
            return Err(MulliganError::NameTaken(target.display().to_string()));
        }

        fs::rename(&current, &target).map_err(|source| MulliganError::Rename {
            path: current.clone(),
            source,
        })?;
        debug!("Renamed {} -> {}", current.display(), target.display());

        self.entries[entity.0] = target;
        Ok(())
    }

    fn stable_id(&self, entity: &EntryId) -> String {
        entity.0.to_string()
    }

    fn is_name_taken(&self, entity: &EntryId, name: &str) -> bool {
        match self.path(entity) {
            Ok(current) => {
                let target = self.target_path(current, name);
                target != current && is_occupied(current, &target)
            }
            Err(_) => false,
        }
    }

    /// Parent directory, plus the kept extension when only stems are renamed
    fn scope(&self, entity: &EntryId) -> String {
        let Ok(path) = self.path(entity) else {
            return String::new();
        };

        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        match path.extension() {
            Some(ext) if !self.include_extension => format!("{}/*.{}", dir, ext.to_string_lossy()),
            _ => dir,
        }
    }

    fn validate_name(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return Some("File names cannot be empty".to_string());
        }
        if name == "." || name == ".." {
            return Some(format!("'{}' is not a valid file name", name));
        }
        if name.contains(['/', '\0', std::path::MAIN_SEPARATOR]) {
            return Some(format!("'{}' contains a path separator or NUL", name));
        }
        None
    }
}

/// Whether `target` names a file other than `current`. On case-insensitive
/// filesystems a case-only rename resolves to the file itself.
fn is_occupied(current: &Path, target: &Path) -> bool {
    target.exists() && !is_same_file(current, target)
}

#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Check if a path should be ignored
fn should_ignore(path: &Path, include_hidden: bool) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };

    if !include_hidden && name.starts_with('.') {
        return true;
    }

    let ignore_dirs = ["target", "node_modules", "__pycache__", "Library", "Temp"];
    path.is_dir() && ignore_dirs.contains(&name.as_ref())
}

/// Check if a file name matches the selection glob
fn matches_pattern(path: &Path, pattern: Option<&Pattern>) -> bool {
    match (pattern, path.file_name()) {
        (None, _) => true,
        (Some(pattern), Some(name)) => pattern.matches(&name.to_string_lossy()),
        (Some(_), None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_scan_filters_and_sorts() -> Result<()> {
        let temp = TempDir::new()?;
        touch(temp.path(), "b.png");
        touch(temp.path(), "a.png");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), ".hidden.png");
        fs::create_dir(temp.path().join("sub"))?;
        touch(&temp.path().join("sub"), "c.png");

        let mut selection = FileSelection::new(temp.path());
        selection.glob = Some("*.png".to_string());

        let store = FileStore::scan(&selection, false)?;
        let names: Vec<String> = store
            .entities()
            .iter()
            .map(|e| store.name(e).unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        selection.recursive = true;
        let store = FileStore::scan(&selection, false)?;
        assert_eq!(store.len(), 3);

        Ok(())
    }

    #[test]
    fn test_set_name_keeps_extension() -> Result<()> {
        let temp = TempDir::new()?;
        let path = touch(temp.path(), "rock.png");

        let mut store = FileStore::from_paths(vec![path], false);
        let entity = EntryId(0);
        assert_eq!(store.name(&entity)?, "rock");

        store.set_name(&entity, "Rock_01")?;
        assert!(temp.path().join("Rock_01.png").exists());
        assert_eq!(store.name(&entity)?, "Rock_01");

        Ok(())
    }

    #[test]
    fn test_set_name_with_extension() -> Result<()> {
        let temp = TempDir::new()?;
        let path = touch(temp.path(), "rock.png");

        let mut store = FileStore::from_paths(vec![path], true);
        store.set_name(&EntryId(0), "rock.jpg")?;
        assert!(temp.path().join("rock.jpg").exists());

        Ok(())
    }

    #[test]
    fn test_refuses_existing_target() -> Result<()> {
        let temp = TempDir::new()?;
        let a = touch(temp.path(), "a.txt");
        let b = touch(temp.path(), "b.txt");

        let mut store = FileStore::from_paths(vec![a, b], false);
        assert!(store.is_name_taken(&EntryId(0), "b"));

        let err = store.set_name(&EntryId(0), "b").unwrap_err();
        assert!(matches!(err, MulliganError::NameTaken(_)));
        assert_eq!(fs::read_to_string(temp.path().join("b.txt"))?, "b.txt");

        Ok(())
    }

    #[test]
    fn test_case_only_rename() -> Result<()> {
        let temp = TempDir::new()?;
        let path = touch(temp.path(), "rock.png");

        let mut store = FileStore::from_paths(vec![path], false);
        assert!(!store.is_name_taken(&EntryId(0), "Rock"));

        store.set_name(&EntryId(0), "Rock")?;
        assert_eq!(store.name(&EntryId(0))?, "Rock");

        let names: Vec<String> = fs::read_dir(temp.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(names, vec!["Rock.png"]);

        Ok(())
    }

    #[test]
    fn test_same_stem_different_extension_do_not_collide() -> Result<()> {
        let temp = TempDir::new()?;
        let png = touch(temp.path(), "rock.png");
        let jpg = touch(temp.path(), "rock.jpg");

        let store = FileStore::from_paths(vec![png.clone(), jpg.clone()], false);
        assert_ne!(store.scope(&EntryId(0)), store.scope(&EntryId(1)));

        let store = FileStore::from_paths(vec![png, jpg], true);
        assert_eq!(store.scope(&EntryId(0)), store.scope(&EntryId(1)));
        Ok(())
    }

    #[test]
    fn test_validate_name() {
        let store = FileStore::from_paths(Vec::new(), false);
        assert!(store.validate_name("").is_some());
        assert!(store.validate_name("..").is_some());
        assert!(store.validate_name("a/b").is_some());
        assert!(store.validate_name("Hero_01").is_none());
    }
}
