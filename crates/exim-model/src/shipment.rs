//! Root shipment aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finance::{ApInvoiceRow, ArInvoiceRow, LedgerSummary, PaymentRequest};
use crate::product::Product;

/// Persisted-format version, checked on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Root aggregate for one export job's compliance and financial data.
///
/// This is the unit of persistence: every save sends the complete
/// `products` and ledger arrays, never a partial patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shipment {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the record was created (RFC 3339).
    pub created_at: String,

    /// When the record was last saved (RFC 3339).
    pub last_saved_at: String,

    /// External job identity, printed on paperwork.
    pub job_number: String,

    /// Export line items; insertion order is display and serial order.
    pub products: Vec<Product>,

    pub ar_invoices: Vec<ArInvoiceRow>,
    pub ar_summary: LedgerSummary,

    pub ap_invoices: Vec<ApInvoiceRow>,
    pub ap_summary: LedgerSummary,

    pub payment_requests: Vec<PaymentRequest>,
}

impl Default for Shipment {
    fn default() -> Self {
        Self::new("")
    }
}

impl Shipment {
    /// Create an empty shipment record for a job.
    pub fn new(job_number: &str) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: now.clone(),
            last_saved_at: now,
            job_number: job_number.to_string(),
            products: Vec::new(),
            ar_invoices: Vec::new(),
            ar_summary: LedgerSummary::default(),
            ap_invoices: Vec::new(),
            ap_summary: LedgerSummary::default(),
            payment_requests: Vec::new(),
        }
    }

    /// The shape a job takes when the backend has no record yet: one blank
    /// product at serial 1 and empty ledgers. Absence of a record is not an
    /// error anywhere in the editor.
    pub fn bootstrap(job_number: &str) -> Self {
        let mut shipment = Self::new(job_number);
        shipment.products.push(Product::with_serial(1));
        shipment
    }

    /// Update the last-saved timestamp.
    pub fn touch(&mut self) {
        self.last_saved_at = Utc::now().to_rfc3339();
    }

    /// Parse the created-at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Parse the last-saved timestamp.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_has_one_blank_product() {
        let shipment = Shipment::bootstrap("EXP-2025-0001");
        assert_eq!(shipment.products.len(), 1);
        assert_eq!(shipment.products[0].serial_number, 1);
        assert!(shipment.products[0].exim_code.is_none());
        assert!(shipment.ar_invoices.is_empty());
        assert!(shipment.payment_requests.is_empty());
    }

    #[test]
    fn touch_advances_last_saved() {
        let mut shipment = Shipment::new("EXP-2025-0001");
        shipment.last_saved_at = "2020-01-01T00:00:00+00:00".to_string();
        shipment.touch();
        let saved = shipment.last_saved_at().expect("parse last_saved_at");
        let created = shipment.created_at().expect("parse created_at");
        assert!(saved >= created);
    }
}
