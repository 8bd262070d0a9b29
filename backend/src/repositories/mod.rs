pub mod attendance_repository;
pub mod memory;

pub use attendance_repository::{AttendanceStore, PgAttendanceStore};
pub use memory::MemoryAttendanceStore;

#[cfg(test)]
pub use attendance_repository::MockAttendanceStore;
