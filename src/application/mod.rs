pub mod cli;
pub mod config;
pub mod markup;
pub mod picker;
pub mod settings;
pub mod tui;
pub mod view;

pub use cli::*;
pub use config::*;
pub use markup::*;
pub use picker::*;
pub use settings::*;
pub use tui::*;
pub use view::*;
