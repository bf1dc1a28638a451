//! # Parse unit cache
//!
//! One entry per resolved path, each moving through
//! `Empty → SnapshotOnly → Parsed`. Invalidation sends an entry back to
//! `Empty` and bumps its version; invalidating an entry that is already empty
//! changes nothing and stays silent.

mod unit_cache;
mod unit_kind;

pub use unit_cache::ParseUnitCache;
pub use unit_kind::UnitKind;
