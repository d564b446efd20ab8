//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `control_panel`: Top bar with event controls, bottom bar with time slider
//! - `main_view`: Central panel with the two projections
//! - `raw_view`: Raw data window
//! - `statistics`: Event statistics side panel

mod control_panel;
mod main_view;
mod raw_view;
mod statistics;
pub mod theme;
