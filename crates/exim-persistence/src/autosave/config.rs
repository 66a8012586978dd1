//! Auto-save configuration.

use serde::{Deserialize, Serialize};

/// Configuration for auto-save behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoSaveConfig {
    /// Whether auto-save is enabled.
    pub enabled: bool,

    /// Debounce delay in milliseconds.
    ///
    /// After an edit, the controller waits this long before saving.
    /// Further edits re-arm the timer.
    pub debounce_ms: u64,

    /// Maximum delay before forcing a save.
    ///
    /// If edits never go quiet, save once this long has passed since the
    /// first unsaved edit.
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 1500,
            max_delay_ms: 30_000,
        }
    }
}

impl AutoSaveConfig {
    /// Create a disabled auto-save config.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check if a save should fire given the time since the last edit and
    /// the time since the first unsaved edit.
    pub fn should_save(&self, since_last_edit_ms: u64, since_first_unsaved_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }

        if since_last_edit_ms >= self.debounce_ms {
            return true;
        }

        if since_first_unsaved_ms >= self.max_delay_ms {
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_editor() {
        let config = AutoSaveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.debounce_ms, 1500);
    }

    #[test]
    fn disabled_never_saves() {
        let config = AutoSaveConfig::disabled();
        assert!(!config.should_save(10_000, 60_000));
    }

    #[test]
    fn saves_after_debounce() {
        let config = AutoSaveConfig::default();
        assert!(!config.should_save(1000, 1000));
        assert!(config.should_save(2000, 2000));
    }

    #[test]
    fn forces_save_after_max_delay() {
        let config = AutoSaveConfig::default();
        // Rapid edits keep the debounce from elapsing.
        assert!(!config.should_save(500, 25_000));
        assert!(config.should_save(500, 35_000));
    }
}
