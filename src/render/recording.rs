use super::{RenderTrigger, TemplateSelector};
use std::sync::Mutex;

/// Trigger that only records the requests it receives
#[derive(Debug, Default)]
pub struct RecordingTrigger {
    requests: Mutex<Vec<TemplateSelector>>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<TemplateSelector> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RenderTrigger for RecordingTrigger {
    fn request_rerender(&self, selector: &TemplateSelector) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(selector.clone());
    }
}
