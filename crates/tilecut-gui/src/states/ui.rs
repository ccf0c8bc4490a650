/// App-wide UI state that is not owned by either pane.
pub struct UIState {
    /// Log messages.
    pub log_messages: Vec<String>,
    pub show_reference: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            log_messages: Vec::new(),
            show_reference: true,
        }
    }
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
