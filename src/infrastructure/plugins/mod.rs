pub mod event_log;
pub mod log_hook;

pub use event_log::*;
pub use log_hook::*;
