//! End-to-end editing scenarios: subform derivation, nested-table
//! lifecycle, and debounced persistence through the session facade.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use exim_editor::{EditorSession, FieldPath};
use exim_model::Shipment;
use exim_persistence::{AutoSaveConfig, JobStore, PersistenceError};
use exim_schemes::Subform;

/// In-memory backend double, shared so tests can inspect saves after the
/// session takes ownership of its clone.
#[derive(Clone, Default)]
struct SharedStore {
    record: Arc<Mutex<Option<Shipment>>>,
    saves: Arc<Mutex<Vec<Shipment>>>,
    fail_load: bool,
}

impl SharedStore {
    fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    fn last_save(&self) -> Shipment {
        self.saves.lock().unwrap().last().cloned().expect("a save")
    }
}

impl JobStore for SharedStore {
    async fn load(&self, _job_id: &str) -> exim_persistence::Result<Option<Shipment>> {
        if self.fail_load {
            return Err(PersistenceError::Deserialization {
                source: "backend unavailable".into(),
            });
        }
        Ok(self.record.lock().unwrap().clone())
    }

    async fn save(&self, _job_id: &str, snapshot: &Shipment) -> exim_persistence::Result<()> {
        *self.record.lock().unwrap() = Some(snapshot.clone());
        self.saves.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

fn quick_config() -> AutoSaveConfig {
    AutoSaveConfig {
        enabled: true,
        debounce_ms: 40,
        max_delay_ms: 10_000,
    }
}

async fn open_session(store: &SharedStore) -> EditorSession<SharedStore> {
    EditorSession::open(store.clone(), "EXP-2025-0042", quick_config())
        .await
        .expect("open session")
}

// ============================================================================
// Load / bootstrap
// ============================================================================

#[tokio::test]
async fn missing_record_bootstraps_one_blank_product() {
    let store = SharedStore::default();
    let session = open_session(&store).await;

    assert_eq!(session.compliance().products().len(), 1);
    assert_eq!(session.compliance().products()[0].serial_number, 1);
    assert!(session.ar().rows().is_empty());
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn existing_record_loads_as_is() {
    let store = SharedStore::default();
    let mut record = Shipment::bootstrap("EXP-2025-0042");
    record.products[0].description = "COTTON YARN".to_string();
    *store.record.lock().unwrap() = Some(record);

    let session = open_session(&store).await;
    assert_eq!(
        session.compliance().products()[0].description,
        "COTTON YARN"
    );
}

#[tokio::test]
async fn failing_backend_propagates_on_open() {
    let store = SharedStore {
        fail_load: true,
        ..SharedStore::default()
    };
    let result = EditorSession::open(store, "EXP-2025-0042", quick_config()).await;
    assert!(result.is_err());
}

// ============================================================================
// Subform derivation (scenarios A and B)
// ============================================================================

#[tokio::test]
async fn advance_licence_product_shows_deec_tab() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.update_product(0, |p| {
        p.exim_code = Some("03 - ADVANCE LICENCE".to_string());
    });

    assert_eq!(
        session.subforms(),
        &[
            Subform::Main,
            Subform::General,
            Subform::Deec,
            Subform::CessExportDuty,
            Subform::AreDetails,
            Subform::ReExport,
            Subform::OtherDetails,
        ]
    );
}

#[tokio::test]
async fn epcg_advance_licence_product_shows_deec_and_epcg_tabs() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.update_product(0, |p| {
        p.exim_code = Some("50 - EPCG AND ADVANCE LICENSE".to_string());
    });

    assert_eq!(
        session.subforms(),
        &[
            Subform::Main,
            Subform::General,
            Subform::Deec,
            Subform::Epcg,
            Subform::CessExportDuty,
            Subform::AreDetails,
            Subform::ReExport,
            Subform::OtherDetails,
        ]
    );
}

// ============================================================================
// Nested tables (scenario C)
// ============================================================================

#[tokio::test]
async fn deec_items_renumber_after_delete() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.add_deec_item(0);
    session.add_deec_item(0);
    session.update_deec_item(0, 1, |item| item.description = "KEPT".to_string());

    let serials = |session: &EditorSession<SharedStore>| -> Vec<u32> {
        session.compliance().products()[0]
            .deec_details
            .as_ref()
            .map(|d| d.deec_items.iter().map(|i| i.serial_number).collect())
            .unwrap_or_default()
    };
    assert_eq!(serials(&session), vec![1, 2]);

    session.remove_deec_item(0, 0);
    assert_eq!(serials(&session), vec![1]);
    let details = session.compliance().products()[0]
        .deec_details
        .as_ref()
        .unwrap();
    assert_eq!(details.deec_items[0].description, "KEPT");
}

#[tokio::test]
async fn dotted_path_write_reaches_nested_record() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    let path: FieldPath = "cessExpDuty.cenvat.date".parse().unwrap();
    session.update_product_field(0, &path, serde_json::json!("2025-03-01"));

    let cess = session.compliance().products()[0]
        .cess_exp_duty
        .as_ref()
        .expect("sub-record materialized");
    assert_eq!(cess.cenvat.as_ref().unwrap().date, "2025-03-01");
    assert!(session.is_dirty());
}

// ============================================================================
// Debounced persistence (P6, scenario D)
// ============================================================================

#[tokio::test]
async fn rapid_edits_coalesce_to_one_save_with_final_value() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;
    session.add_ar_invoice();

    for amount in [100.0, 200.0, 300.0] {
        session.update_ar_invoice(0, |row| row.amount = amount);
        session.tick().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(store.save_count(), 0, "no save inside the debounce window");

    tokio::time::sleep(Duration::from_millis(60)).await;
    session.tick().await;

    assert_eq!(store.save_count(), 1);
    let saved = store.last_save();
    assert!((saved.ar_invoices[0].amount - 300.0).abs() < f64::EPSILON);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn explicit_save_bypasses_window_without_duplicate() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.update_product(0, |p| p.description = "COTTON YARN".to_string());
    assert!(session.save_now().await);
    assert_eq!(store.save_count(), 1);

    tokio::time::sleep(Duration::from_millis(60)).await;
    session.tick().await;
    assert_eq!(store.save_count(), 1, "no follow-up auto-save");
}

#[tokio::test]
async fn controllers_persist_independently() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.update_product(0, |p| p.description = "COTTON YARN".to_string());
    session.add_ar_invoice();
    session.update_ar_invoice(0, |row| row.amount = 4200.0);

    tokio::time::sleep(Duration::from_millis(60)).await;
    session.tick().await;

    // Both windows elapsed: one save per controller, each carrying the
    // complete snapshot, so ordering between them cannot lose data.
    assert_eq!(store.save_count(), 2);
    let saved = store.last_save();
    assert_eq!(saved.products[0].description, "COTTON YARN");
    assert!((saved.ar_invoices[0].amount - 4200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn selection_alone_schedules_no_save() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.add_product();
    assert!(session.save_now().await);
    let baseline = store.save_count();

    session.select_product(1);
    session.subforms();
    tokio::time::sleep(Duration::from_millis(60)).await;
    session.tick().await;

    assert_eq!(store.save_count(), baseline);
}

// ============================================================================
// Snapshot assembly
// ============================================================================

#[tokio::test]
async fn snapshot_carries_all_controller_state() {
    let store = SharedStore::default();
    let mut session = open_session(&store).await;

    session.update_product(0, |p| p.description = "COTTON YARN".to_string());
    session.add_ar_invoice();
    session.update_ar_summary(|s| s.total_amount = 4200.0);
    session.add_ap_invoice();
    session.add_payment_request();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.job_number, "EXP-2025-0042");
    assert_eq!(snapshot.products[0].description, "COTTON YARN");
    assert_eq!(snapshot.ar_invoices.len(), 1);
    assert!((snapshot.ar_summary.total_amount - 4200.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.ap_invoices.len(), 1);
    assert_eq!(snapshot.payment_requests.len(), 1);
    assert_eq!(
        snapshot.payment_requests[0].charges[0].charge_name,
        "EDI CHARGES"
    );
}
