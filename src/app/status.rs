use crate::domain::Selection;

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Scroll to pick a time. Press Enter to confirm.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&mut self, selection: &Selection) {
        self.message = format!("Selected {}", selection.formatted);
    }

    pub fn confirmed(&mut self, selection: &Selection) {
        self.message = format!("Confirmed {}", selection.formatted);
    }

    pub fn recentered(&mut self) {
        self.message = "Back to the start time".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
