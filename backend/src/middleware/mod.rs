pub mod current_user;
pub mod logging;
pub mod request_id;

pub use current_user::*;
pub use logging::*;
pub use request_id::*;
