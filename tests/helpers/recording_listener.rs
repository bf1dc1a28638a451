//! Listener that records every lifecycle notification.

use std::cell::{Cell, RefCell};

use project_host::{ProjectListener, ResolvedPath};

#[derive(Debug, Default)]
pub struct RecordingListener {
    pub model_will_change: Cell<usize>,
    pub model_changed: Cell<usize>,
    pub configuration_resolved: Cell<usize>,
    pub loaded: RefCell<Vec<String>>,
    pub created: RefCell<Vec<String>>,
    pub invalidated: RefCell<Vec<String>>,
    /// Every notification in arrival order.
    pub timeline: RefCell<Vec<String>>,
}

impl RecordingListener {
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.borrow().clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.borrow().clone()
    }

    pub fn timeline(&self) -> Vec<String> {
        self.timeline.borrow().clone()
    }

    pub fn rebuilds(&self) -> (usize, usize) {
        (self.model_will_change.get(), self.model_changed.get())
    }

    fn record(&self, event: String) {
        self.timeline.borrow_mut().push(event);
    }
}

impl ProjectListener for RecordingListener {
    fn on_model_will_change(&self) {
        self.model_will_change.set(self.model_will_change.get() + 1);
        self.record("model-will-change".to_string());
    }

    fn on_model_changed(&self) {
        self.model_changed.set(self.model_changed.get() + 1);
        self.record("model-changed".to_string());
    }

    fn on_configuration_resolved(&self) {
        self.configuration_resolved
            .set(self.configuration_resolved.get() + 1);
        self.record("configuration-resolved".to_string());
    }

    fn on_file_content_loaded(&self, path: &ResolvedPath) {
        self.loaded.borrow_mut().push(path.to_string());
        self.record(format!("loaded {path}"));
    }

    fn on_unit_created(&self, path: &ResolvedPath) {
        self.created.borrow_mut().push(path.to_string());
        self.record(format!("created {path}"));
    }

    fn on_unit_invalidated(&self, path: &ResolvedPath) {
        self.invalidated.borrow_mut().push(path.to_string());
        self.record(format!("invalidated {path}"));
    }
}
