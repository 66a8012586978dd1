//! Financial ledger controllers.
//!
//! AR invoices, AP invoices, and payment requests are three independent
//! instances of the same nested-collection pattern as the compliance
//! tables, minus the scheme concept: every row type has a fixed field set.
//! Each instance persists through its own debounce window, so there is no
//! cross-ledger ordering guarantee.

use exim_model::{ChargeLine, LedgerSummary, PaymentRequest, PurchaseBill};

use crate::collection;

/// One editable ledger: a row array plus its operator-entered summary.
///
/// The summary values (total, outstanding balance, currency, payment
/// terms, notes) are captured from the accounting system, not aggregated
/// from the rows; editing them flows through the same dirty/auto-save path
/// as row edits.
#[derive(Debug, Clone, Default)]
pub struct LedgerController<R: Clone + Default> {
    rows: Vec<R>,
    summary: LedgerSummary,
}

impl<R: Clone + Default> LedgerController<R> {
    pub fn new(rows: Vec<R>, summary: LedgerSummary) -> Self {
        Self { rows, summary }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn summary(&self) -> &LedgerSummary {
        &self.summary
    }

    /// Append one default row.
    pub fn add_row(&mut self) {
        self.rows = collection::append_with(&self.rows, R::default);
    }

    /// Edit the row at `index`, materializing default rows through `index`
    /// when the rendered table is longer than the backing array.
    pub fn update_row(&mut self, index: usize, edit: impl FnOnce(&mut R)) {
        self.rows = collection::update_row_with(&self.rows, index, edit);
    }

    /// Remove the row at `index`. Rows are position-keyed, so nothing is
    /// renumbered; out-of-range is a no-op.
    pub fn remove_row(&mut self, index: usize) {
        self.rows = collection::remove_row_at(&self.rows, index);
    }

    pub fn update_summary(&mut self, edit: impl FnOnce(&mut LedgerSummary)) {
        let mut next = self.summary.clone();
        edit(&mut next);
        self.summary = next;
    }
}

/// Payment requests: the three-level nesting (ledger, request,
/// charge/bill row). Each request's charge and purchase-bill tables are
/// independently editable.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequestController {
    requests: Vec<PaymentRequest>,
}

impl PaymentRequestController {
    pub fn new(requests: Vec<PaymentRequest>) -> Self {
        Self { requests }
    }

    pub fn requests(&self) -> &[PaymentRequest] {
        &self.requests
    }

    /// Append a new draft request: generated reference number, electronic
    /// mode, one pre-populated EDI charge line.
    pub fn add_request(&mut self, job_no: &str) {
        self.requests = collection::append_with(&self.requests, || PaymentRequest::draft(job_no));
    }

    pub fn update_request(&mut self, index: usize, edit: impl FnOnce(&mut PaymentRequest)) {
        if index >= self.requests.len() {
            tracing::debug!(index, "Dropped edit for missing payment request");
            return;
        }
        self.requests = collection::update_row_with(&self.requests, index, edit);
    }

    pub fn remove_request(&mut self, index: usize) {
        self.requests = collection::remove_row_at(&self.requests, index);
    }

    // ------------------------------------------------------------------------
    // Charges
    // ------------------------------------------------------------------------

    pub fn add_charge(&mut self, request: usize) {
        self.update_request(request, |r| {
            r.charges = collection::append_with(&r.charges, ChargeLine::default);
        });
    }

    pub fn update_charge(
        &mut self,
        request: usize,
        index: usize,
        edit: impl FnOnce(&mut ChargeLine),
    ) {
        self.update_request(request, |r| {
            r.charges = collection::update_row_with(&r.charges, index, edit);
        });
    }

    pub fn remove_charge(&mut self, request: usize, index: usize) {
        self.update_request(request, |r| {
            r.charges = collection::remove_row_at(&r.charges, index);
        });
    }

    // ------------------------------------------------------------------------
    // Purchase bills
    // ------------------------------------------------------------------------

    pub fn add_purchase_bill(&mut self, request: usize) {
        self.update_request(request, |r| {
            r.purchase_bills = collection::append_with(&r.purchase_bills, PurchaseBill::default);
        });
    }

    pub fn update_purchase_bill(
        &mut self,
        request: usize,
        index: usize,
        edit: impl FnOnce(&mut PurchaseBill),
    ) {
        self.update_request(request, |r| {
            r.purchase_bills = collection::update_row_with(&r.purchase_bills, index, edit);
        });
    }

    pub fn remove_purchase_bill(&mut self, request: usize, index: usize) {
        self.update_request(request, |r| {
            r.purchase_bills = collection::remove_row_at(&r.purchase_bills, index);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exim_model::ArInvoiceRow;

    #[test]
    fn ledger_row_lifecycle() {
        let mut ledger: LedgerController<ArInvoiceRow> = LedgerController::default();
        ledger.add_row();
        ledger.update_row(0, |row| {
            row.bill_no = "AR-001".to_string();
            row.amount = 4200.0;
        });
        assert_eq!(ledger.rows().len(), 1);
        assert_eq!(ledger.rows()[0].bill_no, "AR-001");

        ledger.remove_row(0);
        assert!(ledger.rows().is_empty());
        // Stale delete from a racing render.
        ledger.remove_row(0);
        assert!(ledger.rows().is_empty());
    }

    #[test]
    fn ledger_update_materializes_prerendered_rows() {
        let mut ledger: LedgerController<ArInvoiceRow> = LedgerController::default();
        // The grid renders two blank rows before the backing array exists.
        ledger.update_row(1, |row| row.amount = 100.0);
        assert_eq!(ledger.rows().len(), 2);
        assert_eq!(ledger.rows()[0].doc_type, "INV");
        assert!((ledger.rows()[1].amount - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_edits_are_independent_of_rows() {
        let mut ledger: LedgerController<ArInvoiceRow> = LedgerController::default();
        ledger.add_row();
        ledger.update_row(0, |row| row.amount = 500.0);
        ledger.update_summary(|s| s.total_amount = 9999.0);
        // No live aggregation: the operator's figure stands.
        assert!((ledger.summary().total_amount - 9999.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_request_has_generated_reference_and_edi_charge() {
        let mut controller = PaymentRequestController::default();
        controller.add_request("EXP-2025-0042");

        let request = &controller.requests()[0];
        assert!(request.request_no.starts_with("PR-"));
        assert_eq!(request.mode, "Electronic");
        assert_eq!(request.charges.len(), 1);
        assert_eq!(request.charges[0].charge_name, "EDI CHARGES");
    }

    #[test]
    fn charge_and_bill_tables_nest_per_request() {
        let mut controller = PaymentRequestController::default();
        controller.add_request("EXP-2025-0042");
        controller.add_request("EXP-2025-0042");

        controller.add_charge(1);
        controller.update_charge(1, 1, |c| c.charge_name = "FUMIGATION".to_string());
        controller.add_purchase_bill(1);
        controller.update_purchase_bill(1, 0, |b| b.vendor = "ACME PEST CONTROL".to_string());

        // First request untouched.
        assert_eq!(controller.requests()[0].charges.len(), 1);
        assert!(controller.requests()[0].purchase_bills.is_empty());

        let second = &controller.requests()[1];
        assert_eq!(second.charges.len(), 2);
        assert_eq!(second.charges[1].charge_name, "FUMIGATION");
        assert_eq!(second.purchase_bills[0].vendor, "ACME PEST CONTROL");
    }

    #[test]
    fn nested_edit_on_missing_request_is_noop() {
        let mut controller = PaymentRequestController::default();
        controller.add_charge(3);
        assert!(controller.requests().is_empty());
    }
}
