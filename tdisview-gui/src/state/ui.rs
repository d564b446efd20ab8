//! UI state for panel visibility and view options.

/// UI panel visibility and toggle state.
pub struct UiState {
    /// Whether the raw data window is visible.
    pub show_raw: bool,
    /// Whether the pad grid is drawn behind the X-Y view.
    pub show_pad_grid: bool,
    /// Contents of the event number field.
    pub event_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_raw: false,
            show_pad_grid: true,
            event_input: String::new(),
        }
    }
}
