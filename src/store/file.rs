use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{AppointmentStore, StoreLock, StoreResult};
use crate::schedule::Snapshot;

/// Snapshot kept as a single JSON document on disk.
///
/// Writers coordinate through a `<data>.lock` file next to the document, so
/// the web server and a cron-run `nomaden schedule` never interleave their
/// read-modify-write cycles.
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut lock_name = OsString::from(path.as_os_str());
        lock_name.push(".lock");
        Self { path, lock_path: PathBuf::from(lock_name) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Replaces `target` with whatever `write` produces.
///
/// Output goes to a temporary file in `directory` that is renamed over the
/// target only after `write` succeeded and the data hit the disk.
pub(crate) fn replace_file<F>(directory: &Path, target: &Path, write: F) -> StoreResult<()>
where
    F: FnOnce(&mut dyn Write) -> StoreResult<()>,
{
    fs::create_dir_all(directory)?;

    // Same directory as the target so the rename stays on one filesystem
    let temp = NamedTempFile::new_in(directory)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    Ok(())
}

impl AppointmentStore for JsonFileStore {
    fn lock_shared(&self) -> StoreResult<StoreLock> {
        StoreLock::shared(&self.lock_path)
    }

    fn lock_exclusive(&self) -> StoreResult<StoreLock> {
        StoreLock::exclusive(&self.lock_path)
    }

    fn load_snapshot(&self) -> StoreResult<Snapshot> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no snapshot file yet, starting empty");
            return Ok(Snapshot::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        debug!(
            waiting = snapshot.waiting.len(),
            current = snapshot.current.len(),
            archive = snapshot.archive.len(),
            "snapshot loaded"
        );
        Ok(snapshot.normalized())
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> StoreResult<()> {
        replace_file(&self.directory(), &self.path, |writer| {
            serde_json::to_writer_pretty(writer, snapshot)?;
            Ok(())
        })?;

        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}
