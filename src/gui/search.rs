//! Search box state

/// Search state
pub struct SearchState {
    /// Text buffer bound to the input widget
    pub query: String,
    /// First frame flag (for auto-focus)
    pub first_frame: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            first_frame: true,
        }
    }
}
