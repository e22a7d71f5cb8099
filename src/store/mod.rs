//! Durable home of the pub list.
//!
//! Stores hand out and take back whole snapshots. Callers hold the store's
//! exclusive lock across a load, transform, save cycle and its shared lock
//! across plain reads (see `service::PubService`).

pub mod file;
pub mod lock;
pub mod memory;

use thiserror::Error;

use crate::schedule::Snapshot;

pub use file::JsonFileStore;
pub use lock::StoreLock;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("could not replace snapshot file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait AppointmentStore: Send + Sync {
    /// Lock taken for reads; other readers may hold it at the same time
    fn lock_shared(&self) -> StoreResult<StoreLock> {
        Ok(StoreLock::unlocked())
    }

    /// Lock taken for a whole read-modify-write cycle, across processes where the store allows
    fn lock_exclusive(&self) -> StoreResult<StoreLock> {
        Ok(StoreLock::unlocked())
    }

    fn load_snapshot(&self) -> StoreResult<Snapshot>;

    /// Replaces the stored snapshot. Either the whole snapshot is written or nothing is.
    fn save_snapshot(&self, snapshot: &Snapshot) -> StoreResult<()>;
}
