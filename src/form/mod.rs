pub mod submission;
pub mod export;

pub use submission::{CommentSubmission, PubSubmission, validate_comment_submission, validate_pub_submission};
pub use export::{export_archive_csv, export_archive_to_file};
