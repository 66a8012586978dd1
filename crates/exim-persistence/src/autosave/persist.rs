//! Debounced save driver for one controller instance.

use exim_model::Shipment;

use super::{AutoSaveConfig, DirtyTracker};
use crate::store::JobStore;

/// Coalesces bursts of edits into one save per quiet period.
///
/// One instance per controller: the product editor and each financial
/// ledger debounce independently, so there is no cross-controller ordering
/// guarantee (and none is needed: every save carries the full snapshot).
///
/// Usage: call [`mark_edit`](Self::mark_edit) on every field change, poll
/// [`flush_if_due`](Self::flush_if_due) from the embedding event loop, and
/// route explicit "Save" actions through [`flush_now`](Self::flush_now).
/// The snapshot is taken at flush time, not edit time, so the last write
/// within a window wins.
#[derive(Debug, Clone)]
pub struct AutoPersist {
    tracker: DirtyTracker,
    config: AutoSaveConfig,
}

impl Default for AutoPersist {
    fn default() -> Self {
        Self::new(AutoSaveConfig::default())
    }
}

impl AutoPersist {
    pub fn new(config: AutoSaveConfig) -> Self {
        Self {
            tracker: DirtyTracker::new(),
            config,
        }
    }

    /// Record an edit, re-arming the debounce window.
    pub fn mark_edit(&mut self) {
        self.tracker.mark_dirty();
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Whether the debounce window has elapsed (or the max delay forces a
    /// save despite ongoing edits).
    pub fn save_due(&self) -> bool {
        if !self.tracker.is_dirty() || self.tracker.is_saving() {
            return false;
        }
        match (
            self.tracker.ms_since_last_edit(),
            self.tracker.ms_since_first_unsaved(),
        ) {
            (Some(since_last), Some(since_first)) => {
                self.config.should_save(since_last, since_first)
            }
            _ => false,
        }
    }

    /// Save if the debounce window has elapsed. Returns whether a save
    /// succeeded. Failures are logged and leave the tracker dirty: the
    /// next tick or edit is the retry.
    pub async fn flush_if_due<S: JobStore>(
        &mut self,
        store: &S,
        job_id: &str,
        snapshot: &Shipment,
    ) -> bool {
        if !self.save_due() {
            return false;
        }
        self.save(store, job_id, snapshot).await
    }

    /// Explicit save: bypasses the debounce and clears any pending state,
    /// so no duplicate auto-save fires shortly after.
    pub async fn flush_now<S: JobStore>(
        &mut self,
        store: &S,
        job_id: &str,
        snapshot: &Shipment,
    ) -> bool {
        self.save(store, job_id, snapshot).await
    }

    /// Discard any pending save without persisting.
    pub fn cancel_pending(&mut self) {
        self.tracker = DirtyTracker::new();
    }

    async fn save<S: JobStore>(&mut self, store: &S, job_id: &str, snapshot: &Shipment) -> bool {
        self.tracker.start_save();
        match store.save(job_id, snapshot).await {
            Ok(()) => {
                self.tracker.save_complete();
                tracing::debug!(job_id, "Auto-save flushed");
                true
            }
            Err(e) => {
                // Best effort: keep editing, keep the dirty flag, let the
                // next window retry.
                self.tracker.save_failed();
                tracing::warn!(job_id, error = %e, "Auto-save failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PersistenceError, Result};
    use std::sync::Mutex;

    /// Store double recording every snapshot it is asked to save.
    #[derive(Default)]
    struct RecordingStore {
        saves: Mutex<Vec<Shipment>>,
        fail: bool,
    }

    impl JobStore for RecordingStore {
        async fn load(&self, _job_id: &str) -> Result<Option<Shipment>> {
            Ok(None)
        }

        async fn save(&self, _job_id: &str, snapshot: &Shipment) -> Result<()> {
            if self.fail {
                return Err(PersistenceError::Serialization {
                    source: "backend unavailable".into(),
                });
            }
            self.saves.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    fn quick_config() -> AutoSaveConfig {
        AutoSaveConfig {
            enabled: true,
            debounce_ms: 30,
            max_delay_ms: 10_000,
        }
    }

    #[tokio::test]
    async fn clean_tracker_never_flushes() {
        let store = RecordingStore::default();
        let mut persist = AutoPersist::new(quick_config());
        let snapshot = Shipment::bootstrap("JOB-1");

        assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
        assert!(store.saves.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn burst_of_edits_coalesces_to_one_save() {
        let store = RecordingStore::default();
        let mut persist = AutoPersist::new(quick_config());
        let mut snapshot = Shipment::bootstrap("JOB-1");

        for description in ["C", "CO", "COTTON"] {
            snapshot.products[0].description = description.to_string();
            persist.mark_edit();
            assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        tokio::time::sleep(std::time::Duration::from_millis(40)).await;
        assert!(persist.flush_if_due(&store, "JOB-1", &snapshot).await);
        // The window went quiet once; the save carries the final edit.
        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].products[0].description, "COTTON");
        drop(saves);

        // Nothing further pending.
        assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
    }

    #[tokio::test]
    async fn explicit_save_bypasses_window_and_clears_pending() {
        let store = RecordingStore::default();
        let mut persist = AutoPersist::new(quick_config());
        let snapshot = Shipment::bootstrap("JOB-1");

        persist.mark_edit();
        assert!(persist.flush_now(&store, "JOB-1", &snapshot).await);
        assert!(!persist.is_dirty());

        tokio::time::sleep(std::time::Duration::from_millis(40)).await;
        assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
        assert_eq!(store.saves.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_save_stays_dirty_for_retry() {
        let store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };
        let mut persist = AutoPersist::new(quick_config());
        let snapshot = Shipment::bootstrap("JOB-1");

        persist.mark_edit();
        tokio::time::sleep(std::time::Duration::from_millis(40)).await;
        assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
        assert!(persist.is_dirty());
    }

    #[tokio::test]
    async fn cancel_discards_pending_save() {
        let store = RecordingStore::default();
        let mut persist = AutoPersist::new(quick_config());
        let snapshot = Shipment::bootstrap("JOB-1");

        persist.mark_edit();
        persist.cancel_pending();

        tokio::time::sleep(std::time::Duration::from_millis(40)).await;
        assert!(!persist.flush_if_due(&store, "JOB-1", &snapshot).await);
        assert!(store.saves.lock().unwrap().is_empty());
    }
}
