pub mod calendar;
pub mod date_event;
pub mod date_range;
pub mod year_range;

pub use calendar::*;
pub use date_event::*;
pub use date_range::*;
pub use year_range::*;
