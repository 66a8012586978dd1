//! Auto-save infrastructure.
//!
//! Provides:
//! - `DirtyTracker` - Tracks unsaved edits with debounce
//! - `AutoSaveConfig` - Settings for auto-save behavior
//! - `AutoPersist` - Per-controller debounced save driver

mod config;
mod persist;
mod tracker;

pub use config::AutoSaveConfig;
pub use persist::AutoPersist;
pub use tracker::DirtyTracker;
