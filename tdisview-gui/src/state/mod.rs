//! Application state modules.

mod session;
mod status;
mod ui;

pub use session::ViewerSession;
pub use status::{StatusKind, StatusLine};
pub use ui::UiState;
