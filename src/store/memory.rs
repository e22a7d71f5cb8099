use std::sync::Mutex;

use super::{AppointmentStore, StoreError, StoreResult};
use crate::schedule::Snapshot;

/// Keeps the snapshot in process memory; used by tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot: Mutex::new(snapshot) }
    }
}

impl AppointmentStore for MemoryStore {
    fn load_snapshot(&self) -> StoreResult<Snapshot> {
        let guard = self.snapshot.lock().map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let mut guard = self.snapshot.lock().map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        *guard = snapshot.clone();
        Ok(())
    }
}
