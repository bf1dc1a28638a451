//! Lifecycle notifications.
//!
//! Each component holds an optional `Rc<dyn ProjectListener>` and calls it
//! synchronously, inline with the state transition being reported.

use crate::base::ResolvedPath;

/// Observer of host lifecycle events. Every method defaults to a no-op.
pub trait ProjectListener {
    /// A model rebuild is about to start.
    fn on_model_will_change(&self) {}

    /// A model rebuild finished and the new model is stored.
    fn on_model_changed(&self) {}

    /// The configuration was parsed from its source unit.
    fn on_configuration_resolved(&self) {}

    /// A content producer returned the content of `path`.
    fn on_file_content_loaded(&self, _path: &ResolvedPath) {}

    /// A parsed unit was created and cached for `path`.
    fn on_unit_created(&self, _path: &ResolvedPath) {}

    /// The cached snapshot and unit of `path` were dropped.
    fn on_unit_invalidated(&self, _path: &ResolvedPath) {}
}
