pub mod id;

pub use id::{AttendanceId, UserId};
