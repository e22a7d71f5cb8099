use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, error};

use super::StoreResult;

/// Advisory lock held for the duration of a read or a read-modify-write cycle.
///
/// File-backed locks are released when the guard drops. Stores without a
/// shared file hand out an unlocked guard.
#[derive(Debug, Default)]
pub struct StoreLock {
    held: Option<(File, PathBuf)>,
}

impl StoreLock {
    pub fn unlocked() -> Self {
        Self::default()
    }

    fn open(path: &Path) -> StoreResult<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new().read(true).write(true).create(true).truncate(false).open(path)?)
    }

    /// Blocks until no other handle holds the lock file exclusively
    pub fn shared(path: &Path) -> StoreResult<Self> {
        let file = Self::open(path)?;
        FileExt::lock_shared(&file)?;
        debug!(path = %path.display(), "acquired shared store lock");
        Ok(Self { held: Some((file, path.to_path_buf())) })
    }

    /// Blocks until this is the only handle holding the lock file
    pub fn exclusive(path: &Path) -> StoreResult<Self> {
        let file = Self::open(path)?;
        FileExt::lock_exclusive(&file)?;
        debug!(path = %path.display(), "acquired exclusive store lock");
        Ok(Self { held: Some((file, path.to_path_buf())) })
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some((file, path)) = self.held.take() {
            if let Err(e) = FileExt::unlock(&file) {
                error!(path = %path.display(), "failed to release store lock: {}", e);
            } else {
                debug!(path = %path.display(), "released store lock");
            }
        }
    }
}
