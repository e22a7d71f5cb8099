pub mod types;
pub mod dates;
pub mod weekly;
pub mod waiting;

pub use types::{Appointment, Comment, Direction, Partition, Snapshot, WeeklyOutcome, WeeklyReport};
pub use dates::{anchor_tuesday, format_date, format_date_short, next_tuesday, target_dates};
pub use weekly::run_weekly_pass;
pub use waiting::{append_comment, append_waiting_entry, move_waiting_entry, soft_delete};
