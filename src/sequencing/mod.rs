//! Line-level input handling: one `note:duration` line becomes one
//! [`PlaybackRequest`].

pub mod line;
pub mod request;

pub use line::{parse_line, DEFAULT_DURATION, DELIMITER};
pub use request::{PlaybackRequest, RequestKind, MAX_DURATION};
