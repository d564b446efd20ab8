//! Plot helpers for the event views.

mod colors;
mod pad_grid;

pub use colors::plane_color32;
pub use pad_grid::{pad_grid_points, plane_positions};
