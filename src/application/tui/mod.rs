pub mod picker_view;
pub mod theme;

pub use picker_view::*;
pub use theme::*;
