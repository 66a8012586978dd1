use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origin classification for a DEEC/EPCG licence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    Indigenous,
    Imported,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Indigenous => "Indigenous",
            ItemType::Imported => "Imported",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("indigenous") => Ok(ItemType::Indigenous),
            s if s.eq_ignore_ascii_case("imported") => Ok(ItemType::Imported),
            other => Err(format!("Unknown item type: {}", other)),
        }
    }
}

/// Basis on which a drawback claim is filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawbackBasis {
    #[default]
    Actual,
    Provisional,
}

/// One row of the DEEC Part C item table.
///
/// Serial numbers are dense and 1-based within the owning product's table;
/// the collection editor renumbers on deletion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeecItem {
    pub serial_number: u32,
    pub item_sno_part_c: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub item_type: ItemType,
}

/// One row of the EPCG item table. Same shape as [`DeecItem`]; the two
/// licence regimes keep separate tables on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpcgItem {
    pub serial_number: u32,
    pub item_sno_part_c: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub item_type: ItemType,
}

/// Licence registration reference (licence number, customs registration,
/// licence date) attached to DEEC or EPCG details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenceRef {
    pub lic_ref_no: String,
    pub regn_no: String,
    pub lic_date: String,
}

/// DEEC (advance licence) sub-record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeecDetails {
    pub is_deec_item: bool,
    pub item_sno_part_e: String,
    pub export_qty_under_licence: f64,
    pub deec_items: Vec<DeecItem>,
    #[serde(rename = "deec_reg_obj")]
    pub licence_refs: Vec<LicenceRef>,
}

/// EPCG (capital goods licence) sub-record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpcgDetails {
    pub is_epcg_item: bool,
    pub item_sno_part_e: String,
    pub export_qty_under_licence: f64,
    pub epcg_items: Vec<EpcgItem>,
    #[serde(rename = "epcg_reg_obj")]
    pub licence_refs: Vec<LicenceRef>,
}

/// Duty drawback claim sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawbackDetails {
    pub dbk_item: bool,
    pub dbk_sr_no: String,
    pub fob_value: f64,
    pub quantity: f64,
    pub dbk_under: DrawbackBasis,
    pub dbk_description: String,
    pub dbk_rate: f64,
    pub dbk_cap: f64,
    pub dbk_amount: f64,
}

impl Default for DrawbackDetails {
    fn default() -> Self {
        Self {
            dbk_item: false,
            dbk_sr_no: String::new(),
            fob_value: 0.0,
            quantity: 0.0,
            dbk_under: DrawbackBasis::Actual,
            dbk_description: String::new(),
            // All-industry rate applied unless the operator overrides it.
            dbk_rate: 1.5,
            dbk_cap: 0.0,
            dbk_amount: 0.0,
        }
    }
}

/// CENVAT certificate block nested under cess/export duty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CenvatDetails {
    pub certificate_number: String,
    pub date: String,
    pub valid_upto: String,
    pub cex_office_code: String,
    pub assessee_code: String,
}

/// Cess and export duty sub-record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CessExportDuty {
    pub cess_duty_applicable: bool,
    pub export_duty: f64,
    pub cess: f64,
    pub other_duty_cess: f64,
    pub third_cess: f64,
    pub cenvat: Option<CenvatDetails>,
}

/// One ARE-1 certificate row (excise clearance for export).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AreDetailRow {
    pub serial_number: u32,
    pub are_number: String,
    pub are_date: String,
    pub commissionerate: String,
    pub division: String,
    pub range: String,
    pub remark: String,
}

/// Re-export declaration: the prior import (bill of entry) this item is
/// being sent back against, with duty and drawback particulars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReExportDetails {
    pub is_re_export: bool,
    pub be_number: String,
    pub be_date: String,
    pub invoice_serial_no: String,
    pub item_serial_no: String,
    pub import_port_code: String,
    pub manual_be: bool,
    pub be_item_description: String,
    pub quantity_exported: f64,
    pub technical_details: String,
    pub input_credit_availed: bool,
    pub personal_use_item: bool,
    pub other_identifying_parameters: String,
    pub against_export_obligation: String,
    pub obligation_no: String,
    pub quantity_imported: f64,
    pub assessable_value: f64,
    pub total_duty_paid: f64,
    pub duty_paid_date: String,
    pub drawback_amt_claimed: f64,
    pub item_un_used: bool,
    pub commissioner_permission: String,
    pub comm_permission_date: String,
    pub board_number: String,
    pub modvat_availed: bool,
    pub modvat_reversed: bool,
}

/// Third-party exporter identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThirdParty {
    pub name: String,
    pub ie_code: String,
    pub branch_sr_no: String,
    pub regn_no: String,
    pub address: String,
}

/// Manufacturer / producer / grower identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manufacturer {
    pub name: String,
    pub code: String,
    pub address: String,
    pub country: String,
    pub state_province: String,
    pub postal_code: String,
    pub source_state: String,
    pub transit_country: String,
}

/// Other-details sub-record: accessories declaration, third-party export,
/// manufacturer identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherDetails {
    pub accessories: String,
    pub accessories_remarks: String,
    pub is_third_party_export: bool,
    pub third_party: ThirdParty,
    pub manufacturer: Manufacturer,
}

/// One export line item.
///
/// Identity is positional within `Shipment::products`; `serial_number` is a
/// display marker printed on prior paperwork and deliberately survives
/// deletion of earlier products (see the collection editor's renumber
/// policy).
///
/// Scheme-specific sub-records are `Option` and present only once their
/// subform has been filled in. A populated sub-record whose subform is not
/// applicable under the current `exim_code` is kept: the scheme catalog
/// controls what is displayed, not what is stored, so flipping a code back
/// and forth loses nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub serial_number: u32,
    pub description: String,
    /// Tariff heading (RITC) under which the item is classified.
    pub ritc: String,
    pub quantity: f64,
    pub soc_quantity: f64,
    pub unit_price: f64,
    /// Unit-of-quantity code the price applies per.
    pub per: String,
    pub amount: f64,

    /// Export-incentive scheme classification; absent means the default
    /// subform set applies.
    pub exim_code: Option<String>,
    pub nfei_category: String,
    pub reward_item: bool,
    pub end_use: String,
    pub origin_district: String,
    pub origin_state: String,
    pub material_code: String,

    pub deec_details: Option<DeecDetails>,
    pub epcg_details: Option<EpcgDetails>,
    pub drawback_details: Option<DrawbackDetails>,
    pub cess_exp_duty: Option<CessExportDuty>,
    pub are_details: Vec<AreDetailRow>,
    pub re_export: Option<ReExportDetails>,
    pub other_details: Option<OtherDetails>,
}

impl Product {
    /// A blank product carrying only its serial number, as created by the
    /// "add product" action. No scheme sub-records are materialized.
    pub fn with_serial(serial_number: u32) -> Self {
        Self {
            serial_number,
            ..Self::default()
        }
    }
}
