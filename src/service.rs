use std::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::{SchedulingError, SchedulingResult};
use crate::form::{CommentSubmission, PubSubmission};
use crate::schedule::{self, dates::SLOTS_AHEAD, Appointment, Comment, Direction, Snapshot, WeeklyReport};
use crate::store::{AppointmentStore, StoreError};

/// Audit string recorded on created, commented and deleted pubs: `<timestamp>$<submitter>`
pub fn provenance(submitter: Option<&str>, now: NaiveDateTime) -> String {
    format!("{}${}", now.format("%Y-%m-%dT%H:%M:%S%.6f"), submitter.unwrap_or("None"))
}

/// Front page data: the next dated pubs and the waiting list, without provenance
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub fixed: Vec<Appointment>,
    pub waiting: Vec<Appointment>,
}

/// Runs pub list operations against a store.
///
/// Each mutation is one load, transform, save cycle under the in-process
/// write lock and the store's exclusive lock, so neither concurrent
/// requests nor a second process lose each other's updates. Reads take the
/// shared locks. Nothing is saved when the transformation fails.
pub struct PubService {
    store: Box<dyn AppointmentStore>,
    lock: RwLock<()>,
}

impl PubService {
    pub fn new(store: Box<dyn AppointmentStore>) -> Self {
        Self { store, lock: RwLock::new(()) }
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> SchedulingResult<T> {
        let _guard = self.lock.read().map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let _store_lock = self.store.lock_shared()?;
        let snapshot = self.store.load_snapshot()?;
        Ok(f(&snapshot))
    }

    fn mutate<T>(&self, f: impl FnOnce(&Snapshot) -> SchedulingResult<(Snapshot, T)>) -> SchedulingResult<T> {
        let _guard = self.lock.write().map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let _store_lock = self.store.lock_exclusive()?;
        let snapshot = self.store.load_snapshot()?;
        let (next, value) = f(&snapshot)?;
        self.store.save_snapshot(&next)?;
        Ok(value)
    }

    pub fn snapshot(&self) -> SchedulingResult<Snapshot> {
        self.read(Snapshot::clone)
    }

    pub fn overview(&self) -> SchedulingResult<Overview> {
        self.read(|snapshot| Overview {
            fixed: snapshot.upcoming().into_iter().take(SLOTS_AHEAD).map(Appointment::anonymized).collect(),
            waiting: snapshot.waiting.iter().map(Appointment::anonymized).collect(),
        })
    }

    pub fn archive(&self) -> SchedulingResult<Vec<Appointment>> {
        self.read(|snapshot| snapshot.archive_by_date().into_iter().map(Appointment::anonymized).collect())
    }

    /// The pubs shown on the printed poster
    pub fn poster(&self) -> SchedulingResult<Vec<Appointment>> {
        self.read(|snapshot| snapshot.upcoming().into_iter().take(SLOTS_AHEAD).map(Appointment::anonymized).collect())
    }

    pub fn enter_pub(
        &self,
        form: &PubSubmission,
        submitter: Option<&str>,
        now: NaiveDateTime,
    ) -> SchedulingResult<Appointment> {
        let appointment = Appointment::new(
            form.name.trim(),
            form.street.trim(),
            form.city.trim(),
            form.public_transport.trim(),
            now,
            Some(provenance(submitter, now)),
        );
        let id = appointment.id.clone();

        self.mutate(|snapshot| {
            let next = schedule::append_waiting_entry(snapshot, appointment);
            let entered = next.waiting.iter().find(|a| a.id == id).cloned();
            Ok((next, entered))
        })?
        .ok_or_else(|| SchedulingError::not_found(&id))
    }

    pub fn comment(
        &self,
        form: &CommentSubmission,
        submitter: Option<&str>,
        now: NaiveDateTime,
    ) -> SchedulingResult<()> {
        let comment = Comment {
            author: form.author.trim().to_string(),
            text: form.text.trim().to_string(),
            source: Some(provenance(submitter, now)),
        };
        self.mutate(|snapshot| Ok((schedule::append_comment(snapshot, &form.id, comment)?, ())))
    }

    pub fn move_entry(&self, id: &str, direction: Direction) -> SchedulingResult<()> {
        self.mutate(|snapshot| Ok((schedule::move_waiting_entry(snapshot, id, direction)?, ())))
    }

    pub fn delete(&self, id: &str, submitter: Option<&str>, now: NaiveDateTime) -> SchedulingResult<()> {
        let stamp = provenance(submitter, now);
        self.mutate(|snapshot| Ok((schedule::soft_delete(snapshot, id, &stamp)?, ())))
    }

    /// Runs the weekly rotation and persists it as a single write
    pub fn run_weekly(&self, today: NaiveDate) -> SchedulingResult<WeeklyReport> {
        self.mutate(|snapshot| {
            let outcome = schedule::run_weekly_pass(snapshot, today);
            Ok((outcome.snapshot, outcome.report))
        })
    }

    /// Appends already-dated pubs straight to the archive
    pub fn import_archive(&self, appointments: Vec<Appointment>) -> SchedulingResult<usize> {
        let count = appointments.len();
        self.mutate(|snapshot| {
            let mut next = snapshot.clone();
            next.archive.extend(appointments.into_iter().filter(|a| a.scheduled_date.is_some()));
            let added = next.archive.len() - snapshot.archive.len();
            Ok((next, added))
        })
        .map(|added| {
            info!(added, skipped = count - added, "archive imported");
            added
        })
    }
}
