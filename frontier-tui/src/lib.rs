pub mod app;
pub mod components;
pub mod keymap;
pub mod theme;

pub use app::{ExitReason, Services, run};
pub use theme::Theme;
