use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One accounts-receivable invoice row. Rows are position-keyed; there is
/// no serial field to renumber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArInvoiceRow {
    pub date: String,
    pub bill_no: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub organization: String,
    pub currency: String,
    pub amount: f64,
    pub balance: f64,
}

impl Default for ArInvoiceRow {
    fn default() -> Self {
        Self {
            date: String::new(),
            bill_no: String::new(),
            doc_type: "INV".to_string(),
            organization: String::new(),
            currency: String::new(),
            amount: 0.0,
            balance: 0.0,
        }
    }
}

/// One accounts-payable invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApInvoiceRow {
    pub date: String,
    pub bill_no: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub organization: String,
    pub currency: String,
    pub amount: f64,
    pub balance: f64,
    pub vendor_bill_no: String,
}

impl Default for ApInvoiceRow {
    fn default() -> Self {
        Self {
            date: String::new(),
            bill_no: String::new(),
            doc_type: "INV".to_string(),
            organization: String::new(),
            currency: String::new(),
            amount: 0.0,
            balance: 0.0,
            vendor_bill_no: String::new(),
        }
    }
}

/// Operator-entered ledger summary. These values are captured from the
/// accounting system, not aggregated from the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSummary {
    pub total_amount: f64,
    pub outstanding_balance: f64,
    pub default_currency: String,
    pub payment_terms_days: u32,
    pub notes: String,
}

impl Default for LedgerSummary {
    fn default() -> Self {
        Self {
            total_amount: 0.0,
            outstanding_balance: 0.0,
            default_currency: String::new(),
            payment_terms_days: 30,
            notes: String::new(),
        }
    }
}

/// One charge line on a payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeLine {
    pub charge_name: String,
    pub amount_tc: f64,
    pub curr: String,
    pub amount_hc: f64,
    pub payable_to: String,
}

impl Default for ChargeLine {
    fn default() -> Self {
        Self {
            charge_name: String::new(),
            amount_tc: 0.0,
            curr: "INR".to_string(),
            amount_hc: 0.0,
            payable_to: String::new(),
        }
    }
}

impl ChargeLine {
    /// The filing charge every new payment request starts with.
    pub fn edi_charges() -> Self {
        Self {
            charge_name: "EDI CHARGES".to_string(),
            amount_tc: 1.0,
            curr: "INR".to_string(),
            amount_hc: 1.0,
            payable_to: String::new(),
        }
    }
}

/// One vendor purchase bill attached to a payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseBill {
    pub bill_no: String,
    pub bill_date: String,
    pub vendor: String,
    pub amount: f64,
    pub curr: String,
}

impl Default for PurchaseBill {
    fn default() -> Self {
        Self {
            bill_no: String::new(),
            bill_date: String::new(),
            vendor: String::new(),
            amount: 0.0,
            curr: "INR".to_string(),
        }
    }
}

/// One payment request, nesting its own charge and purchase-bill tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    pub date: String,
    pub request_no: String,
    pub mode: String,
    pub payee_name: String,
    pub amount: f64,
    pub status: String,
    pub remarks: String,
    pub pay_to: String,
    pub against: String,
    pub job_expenses: bool,
    pub non_job_expenses: bool,
    pub job_no: String,
    pub request_to: String,
    pub reference_no: String,
    pub mode_of_payment: String,
    pub mark_as_urgent: bool,
    pub narration: String,
    pub charges: Vec<ChargeLine>,
    pub purchase_bills: Vec<PurchaseBill>,
    pub total_amount: f64,
}

impl PaymentRequest {
    /// A new draft request: generated reference number, today's date,
    /// electronic mode, and the single pre-populated EDI charge line.
    pub fn draft(job_no: &str) -> Self {
        let now = Utc::now();
        Self {
            date: now.date_naive().to_string(),
            request_no: format!("PR-{}", now.timestamp_millis()),
            mode: "Electronic".to_string(),
            status: "Pending".to_string(),
            pay_to: "Vendor".to_string(),
            against: "Expense".to_string(),
            job_expenses: true,
            job_no: job_no.to_string(),
            mode_of_payment: "Cheque No.".to_string(),
            charges: vec![ChargeLine::edi_charges()],
            ..Self::default()
        }
    }
}
