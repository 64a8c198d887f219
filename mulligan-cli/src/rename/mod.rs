//! Bulk preview and apply
//!
//! Previews run a sequence over a whole batch and flag empty or colliding
//! results. Applying goes through a [`NamingStore`] with two-phase conflict
//! avoidance so names can be swapped or rotated within a batch.

mod fs_store;
mod journal;
mod preview;
mod store;
mod transaction;

pub use fs_store::{EntryId, FileSelection, FileStore};
pub use journal::{JournalEntry, RenameJournal};
pub use preview::{BulkRenamePreview, PreviewWarning, RenamePreview};
pub use store::{MemoryStore, NamingStore};
pub use transaction::{
    revert, ApplyError, ApplyReport, ObjectNameDelta, RenameTransaction, TransactionMode,
};
