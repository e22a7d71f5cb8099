//! Pub meetup rotation for the Nomaden.
//!
//! Visitors propose pubs to a waiting list. Once a week the rotation moves
//! past meetups to the archive and fills the next four Tuesdays from the
//! front of the waiting list. Moderators can reorder and delete entries.

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logging;
pub mod parser;
pub mod schedule;
pub mod service;
pub mod store;
pub mod web;

pub use error::{InvalidState, SchedulingError, SchedulingResult};
pub use schedule::{Appointment, Comment, Direction, Snapshot, WeeklyReport};
pub use service::PubService;
pub use store::{AppointmentStore, JsonFileStore, MemoryStore, StoreError};
