use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A remark left on a pub by a visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub source: Option<String>,
}

/// A proposed or scheduled pub meetup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub public_transport: String,
    pub entered_at: NaiveDateTime,
    pub scheduled_date: Option<NaiveDate>,
    pub sort_order: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub source: Option<String>,
    #[serde(default)]
    pub removed: Option<String>,
}

impl Appointment {
    /// Creates an undated appointment with a fresh id
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        public_transport: impl Into<String>,
        entered_at: NaiveDateTime,
        source: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            street: street.into(),
            city: city.into(),
            public_transport: public_transport.into(),
            entered_at,
            scheduled_date: None,
            sort_order: 0,
            comments: Vec::new(),
            source,
            removed: None,
        }
    }

    /// Copy suitable for the public archive: no provenance on the pub or its comments
    pub fn anonymized(&self) -> Self {
        let mut copy = self.clone();
        copy.source = None;
        for comment in &mut copy.comments {
            comment.source = None;
        }
        copy
    }
}

/// Which partition of the snapshot holds an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Waiting,
    Current,
    Archive,
    Removed,
}

/// Full state of the pub list.
///
/// `waiting` is kept ordered by `sort_order` ascending; `current` and
/// `archive` entries always carry a `scheduled_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub waiting: Vec<Appointment>,
    #[serde(default)]
    pub current: Vec<Appointment>,
    #[serde(default)]
    pub archive: Vec<Appointment>,
    #[serde(default)]
    pub removed: Vec<Appointment>,
}

impl Snapshot {
    /// Restores the waiting-list ordering after loading from an external source
    pub fn normalized(mut self) -> Self {
        self.waiting.sort_by_key(|a| a.sort_order);
        self
    }

    /// Finds the partition holding `id`, live partitions first
    pub fn locate(&self, id: &str) -> Option<Partition> {
        let holds = |list: &[Appointment]| list.iter().any(|a| a.id == id);
        if holds(&self.waiting) {
            Some(Partition::Waiting)
        } else if holds(&self.current) {
            Some(Partition::Current)
        } else if holds(&self.archive) {
            Some(Partition::Archive)
        } else if holds(&self.removed) {
            Some(Partition::Removed)
        } else {
            None
        }
    }

    /// Current appointments ordered by date
    pub fn upcoming(&self) -> Vec<&Appointment> {
        let mut fixed: Vec<&Appointment> = self.current.iter().collect();
        fixed.sort_by_key(|a| a.scheduled_date);
        fixed
    }

    /// Archived appointments ordered by date
    pub fn archive_by_date(&self) -> Vec<&Appointment> {
        let mut archived: Vec<&Appointment> = self.archive.iter().collect();
        archived.sort_by_key(|a| a.scheduled_date);
        archived
    }
}

/// Direction for manual waiting-list curation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// What a weekly pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub archived: Vec<Appointment>,
    pub scheduled: Vec<(String, NaiveDate)>,
    pub still_waiting: Vec<Appointment>,
}

impl WeeklyReport {
    pub fn is_empty(&self) -> bool {
        self.archived.is_empty() && self.scheduled.is_empty()
    }
}

/// New snapshot plus the report of a weekly pass
#[derive(Debug, Clone)]
pub struct WeeklyOutcome {
    pub snapshot: Snapshot,
    pub report: WeeklyReport,
}
