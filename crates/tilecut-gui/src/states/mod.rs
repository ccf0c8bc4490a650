mod pane;
mod ui;

pub use pane::PaneState;
pub use ui::UIState;
