//! Per-job editing session.
//!
//! Wires the compliance and ledger controllers to the persistence
//! boundary. Every mutating call routes through the owning controller and
//! marks that controller's auto-persist tracker; the embedding event loop
//! polls [`EditorSession::tick`] (a ~500 ms interval works well) to flush
//! whichever debounce windows have gone quiet.

use exim_model::{ApInvoiceRow, ArInvoiceRow, Shipment};
use exim_persistence::{AutoPersist, AutoSaveConfig, JobStore};
use serde_json::Value;

use crate::compliance::ProductComplianceController;
use crate::ledger::{LedgerController, PaymentRequestController};
use crate::path::FieldPath;

/// One open job's editing state.
///
/// The session owns the in-memory record between load and drop;
/// persistence of the authoritative copy is the store's responsibility.
/// Each controller debounces independently: a burst of AR edits saves once
/// without forcing the compliance tab's window, and no cross-controller
/// ordering is guaranteed. Every save carries the complete snapshot, so
/// orderings cannot lose data.
///
/// Dropping the session discards any pending saves deterministically:
/// the pending state lives in the trackers the session owns, not in a
/// detached timer.
pub struct EditorSession<S: JobStore> {
    store: S,
    job_id: String,
    /// Loaded record with its collection fields drained into the
    /// controllers; re-assembled by [`snapshot`](Self::snapshot).
    base: Shipment,

    compliance: ProductComplianceController,
    ar: LedgerController<ArInvoiceRow>,
    ap: LedgerController<ApInvoiceRow>,
    requests: PaymentRequestController,

    compliance_persist: AutoPersist,
    ar_persist: AutoPersist,
    ap_persist: AutoPersist,
    requests_persist: AutoPersist,
}

impl<S: JobStore> EditorSession<S> {
    /// Open a job for editing. A job with no stored record starts from
    /// [`Shipment::bootstrap`] (one blank product, empty ledgers); that is
    /// not an error. A failing backend is one, since editing a bootstrap
    /// over an unreadable record would let the next auto-save clobber it.
    pub async fn open(
        store: S,
        job_id: &str,
        config: AutoSaveConfig,
    ) -> exim_persistence::Result<Self> {
        let mut shipment = match store.load(job_id).await? {
            Some(record) => record,
            None => Shipment::bootstrap(job_id),
        };

        let products = std::mem::take(&mut shipment.products);
        let ar_rows = std::mem::take(&mut shipment.ar_invoices);
        let ar_summary = std::mem::take(&mut shipment.ar_summary);
        let ap_rows = std::mem::take(&mut shipment.ap_invoices);
        let ap_summary = std::mem::take(&mut shipment.ap_summary);
        let payment_requests = std::mem::take(&mut shipment.payment_requests);

        Ok(Self {
            store,
            job_id: job_id.to_string(),
            base: shipment,
            compliance: ProductComplianceController::new(products),
            ar: LedgerController::new(ar_rows, ar_summary),
            ap: LedgerController::new(ap_rows, ap_summary),
            requests: PaymentRequestController::new(payment_requests),
            compliance_persist: AutoPersist::new(config.clone()),
            ar_persist: AutoPersist::new(config.clone()),
            ap_persist: AutoPersist::new(config.clone()),
            requests_persist: AutoPersist::new(config),
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Whether any controller has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.compliance_persist.is_dirty()
            || self.ar_persist.is_dirty()
            || self.ap_persist.is_dirty()
            || self.requests_persist.is_dirty()
    }

    /// The full record as it stands right now. Taken at flush time, so the
    /// last write within a debounce window is what reaches the store.
    pub fn snapshot(&self) -> Shipment {
        let mut snapshot = self.base.clone();
        snapshot.products = self.compliance.products().to_vec();
        snapshot.ar_invoices = self.ar.rows().to_vec();
        snapshot.ar_summary = self.ar.summary().clone();
        snapshot.ap_invoices = self.ap.rows().to_vec();
        snapshot.ap_summary = self.ap.summary().clone();
        snapshot.payment_requests = self.requests.requests().to_vec();
        snapshot
    }

    /// Flush every controller whose debounce window has elapsed.
    pub async fn tick(&mut self) {
        let snapshot = self.snapshot();
        self.compliance_persist
            .flush_if_due(&self.store, &self.job_id, &snapshot)
            .await;
        self.ar_persist
            .flush_if_due(&self.store, &self.job_id, &snapshot)
            .await;
        self.ap_persist
            .flush_if_due(&self.store, &self.job_id, &snapshot)
            .await;
        self.requests_persist
            .flush_if_due(&self.store, &self.job_id, &snapshot)
            .await;
    }

    /// Explicit save: bypasses every debounce window with a single save of
    /// the full snapshot, then clears the pending state so no duplicate
    /// auto-save fires shortly after. Returns whether the save succeeded.
    pub async fn save_now(&mut self) -> bool {
        let snapshot = self.snapshot();
        let saved = self
            .compliance_persist
            .flush_now(&self.store, &self.job_id, &snapshot)
            .await;
        if saved {
            self.ar_persist.cancel_pending();
            self.ap_persist.cancel_pending();
            self.requests_persist.cancel_pending();
        }
        saved
    }

    // ------------------------------------------------------------------------
    // Product compliance
    // ------------------------------------------------------------------------

    pub fn compliance(&self) -> &ProductComplianceController {
        &self.compliance
    }

    /// Selection only; no data change, no save scheduled.
    pub fn select_product(&mut self, index: usize) {
        self.compliance.select_product(index);
    }

    /// The subform tabs to render for the selected product.
    pub fn subforms(&mut self) -> &'static [exim_schemes::Subform] {
        self.compliance.derive_subforms()
    }

    pub fn add_product(&mut self) {
        self.compliance.add_product();
        self.compliance_persist.mark_edit();
    }

    pub fn remove_product(&mut self, index: usize) {
        self.compliance.remove_product(index);
        self.compliance_persist.mark_edit();
    }

    pub fn update_product_field(&mut self, index: usize, path: &FieldPath, value: Value) {
        if self.compliance.update_product_field(index, path, value) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn update_product(&mut self, index: usize, edit: impl FnOnce(&mut exim_model::Product)) {
        if self.compliance.update_product(index, edit) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn add_deec_item(&mut self, product: usize) {
        if self.compliance.add_deec_item(product) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn update_deec_item(
        &mut self,
        product: usize,
        item: usize,
        edit: impl FnOnce(&mut exim_model::DeecItem),
    ) {
        if self.compliance.update_deec_item(product, item, edit) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn remove_deec_item(&mut self, product: usize, item: usize) {
        if self.compliance.remove_deec_item(product, item) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn add_epcg_item(&mut self, product: usize) {
        if self.compliance.add_epcg_item(product) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn update_epcg_item(
        &mut self,
        product: usize,
        item: usize,
        edit: impl FnOnce(&mut exim_model::EpcgItem),
    ) {
        if self.compliance.update_epcg_item(product, item, edit) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn remove_epcg_item(&mut self, product: usize, item: usize) {
        if self.compliance.remove_epcg_item(product, item) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn add_are_row(&mut self, product: usize) {
        if self.compliance.add_are_row(product) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn update_are_row(
        &mut self,
        product: usize,
        row: usize,
        edit: impl FnOnce(&mut exim_model::AreDetailRow),
    ) {
        if self.compliance.update_are_row(product, row, edit) {
            self.compliance_persist.mark_edit();
        }
    }

    pub fn remove_are_row(&mut self, product: usize, row: usize) {
        if self.compliance.remove_are_row(product, row) {
            self.compliance_persist.mark_edit();
        }
    }

    // ------------------------------------------------------------------------
    // AR ledger
    // ------------------------------------------------------------------------

    pub fn ar(&self) -> &LedgerController<ArInvoiceRow> {
        &self.ar
    }

    pub fn add_ar_invoice(&mut self) {
        self.ar.add_row();
        self.ar_persist.mark_edit();
    }

    pub fn update_ar_invoice(&mut self, index: usize, edit: impl FnOnce(&mut ArInvoiceRow)) {
        self.ar.update_row(index, edit);
        self.ar_persist.mark_edit();
    }

    pub fn remove_ar_invoice(&mut self, index: usize) {
        self.ar.remove_row(index);
        self.ar_persist.mark_edit();
    }

    pub fn update_ar_summary(&mut self, edit: impl FnOnce(&mut exim_model::LedgerSummary)) {
        self.ar.update_summary(edit);
        self.ar_persist.mark_edit();
    }

    // ------------------------------------------------------------------------
    // AP ledger
    // ------------------------------------------------------------------------

    pub fn ap(&self) -> &LedgerController<ApInvoiceRow> {
        &self.ap
    }

    pub fn add_ap_invoice(&mut self) {
        self.ap.add_row();
        self.ap_persist.mark_edit();
    }

    pub fn update_ap_invoice(&mut self, index: usize, edit: impl FnOnce(&mut ApInvoiceRow)) {
        self.ap.update_row(index, edit);
        self.ap_persist.mark_edit();
    }

    pub fn remove_ap_invoice(&mut self, index: usize) {
        self.ap.remove_row(index);
        self.ap_persist.mark_edit();
    }

    pub fn update_ap_summary(&mut self, edit: impl FnOnce(&mut exim_model::LedgerSummary)) {
        self.ap.update_summary(edit);
        self.ap_persist.mark_edit();
    }

    // ------------------------------------------------------------------------
    // Payment requests
    // ------------------------------------------------------------------------

    pub fn payment_requests(&self) -> &PaymentRequestController {
        &self.requests
    }

    pub fn add_payment_request(&mut self) {
        let job_no = self.base.job_number.clone();
        self.requests.add_request(&job_no);
        self.requests_persist.mark_edit();
    }

    pub fn update_payment_request(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut exim_model::PaymentRequest),
    ) {
        self.requests.update_request(index, edit);
        self.requests_persist.mark_edit();
    }

    pub fn remove_payment_request(&mut self, index: usize) {
        self.requests.remove_request(index);
        self.requests_persist.mark_edit();
    }

    pub fn add_charge(&mut self, request: usize) {
        self.requests.add_charge(request);
        self.requests_persist.mark_edit();
    }

    pub fn update_charge(
        &mut self,
        request: usize,
        index: usize,
        edit: impl FnOnce(&mut exim_model::ChargeLine),
    ) {
        self.requests.update_charge(request, index, edit);
        self.requests_persist.mark_edit();
    }

    pub fn remove_charge(&mut self, request: usize, index: usize) {
        self.requests.remove_charge(request, index);
        self.requests_persist.mark_edit();
    }

    pub fn add_purchase_bill(&mut self, request: usize) {
        self.requests.add_purchase_bill(request);
        self.requests_persist.mark_edit();
    }

    pub fn update_purchase_bill(
        &mut self,
        request: usize,
        index: usize,
        edit: impl FnOnce(&mut exim_model::PurchaseBill),
    ) {
        self.requests.update_purchase_bill(request, index, edit);
        self.requests_persist.mark_edit();
    }

    pub fn remove_purchase_bill(&mut self, request: usize, index: usize) {
        self.requests.remove_purchase_bill(request, index);
        self.requests_persist.mark_edit();
    }
}
