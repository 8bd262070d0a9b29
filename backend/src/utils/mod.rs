pub mod pagination;
pub mod time;
