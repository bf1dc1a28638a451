//! Listeners installed by the host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::base::ResolvedPath;
use crate::events::ProjectListener;

/// Logs every lifecycle notification through `tracing` and times rebuilds.
#[derive(Debug, Default)]
pub struct TracingListener {
    rebuild_started: Cell<Option<Instant>>,
}

impl TracingListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectListener for TracingListener {
    fn on_model_will_change(&self) {
        self.rebuild_started.set(Some(Instant::now()));
        tracing::debug!("building model...");
    }

    fn on_model_changed(&self) {
        match self.rebuild_started.take() {
            Some(started) => tracing::debug!("built model in {:?}", started.elapsed()),
            None => tracing::debug!("built model"),
        }
    }

    fn on_configuration_resolved(&self) {
        tracing::debug!("configuration resolved");
    }

    fn on_file_content_loaded(&self, path: &ResolvedPath) {
        tracing::trace!("loaded content of {path}");
    }

    fn on_unit_created(&self, path: &ResolvedPath) {
        tracing::trace!("created unit {path}");
    }

    fn on_unit_invalidated(&self, path: &ResolvedPath) {
        tracing::trace!("invalidated unit {path}");
    }
}

/// Listener the host installs on its own components.
///
/// Unit creation and invalidation mark the host dirty, except while a
/// rebuild is running: units the engine pulls in during a rebuild must not
/// schedule another one. Every notification is then forwarded to the
/// embedder's listener.
pub(super) struct HostObserver {
    dirty: Cell<bool>,
    rebuild_in_progress: Cell<bool>,
    forward: Option<Rc<dyn ProjectListener>>,
}

impl HostObserver {
    pub(super) fn new(forward: Option<Rc<dyn ProjectListener>>) -> Self {
        Self {
            dirty: Cell::new(false),
            rebuild_in_progress: Cell::new(false),
            forward,
        }
    }

    pub(super) fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub(super) fn set_dirty(&self, dirty: bool) {
        self.dirty.set(dirty);
    }

    fn mark_dirty(&self) {
        if !self.rebuild_in_progress.get() {
            self.dirty.set(true);
        }
    }

    fn forward(&self) -> Option<&dyn ProjectListener> {
        self.forward.as_deref()
    }
}

impl ProjectListener for HostObserver {
    fn on_model_will_change(&self) {
        if let Some(listener) = self.forward() {
            listener.on_model_will_change();
        }
    }

    fn on_model_changed(&self) {
        if let Some(listener) = self.forward() {
            listener.on_model_changed();
        }
    }

    fn on_configuration_resolved(&self) {
        if let Some(listener) = self.forward() {
            listener.on_configuration_resolved();
        }
    }

    fn on_file_content_loaded(&self, path: &ResolvedPath) {
        if let Some(listener) = self.forward() {
            listener.on_file_content_loaded(path);
        }
    }

    fn on_unit_created(&self, path: &ResolvedPath) {
        self.mark_dirty();
        if let Some(listener) = self.forward() {
            listener.on_unit_created(path);
        }
    }

    fn on_unit_invalidated(&self, path: &ResolvedPath) {
        self.mark_dirty();
        if let Some(listener) = self.forward() {
            listener.on_unit_invalidated(path);
        }
    }
}

/// Holds the rebuild flag for its lifetime, so a failed rebuild still
/// releases it.
pub(super) struct RebuildGuard(Rc<HostObserver>);

impl RebuildGuard {
    pub(super) fn enter(observer: Rc<HostObserver>) -> Self {
        observer.rebuild_in_progress.set(true);
        Self(observer)
    }
}

impl Drop for RebuildGuard {
    fn drop(&mut self) {
        self.0.rebuild_in_progress.set(false);
    }
}
