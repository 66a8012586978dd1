pub mod finance;
pub mod product;
pub mod shipment;

pub use finance::{
    ApInvoiceRow, ArInvoiceRow, ChargeLine, LedgerSummary, PaymentRequest, PurchaseBill,
};
pub use product::{
    AreDetailRow, CenvatDetails, CessExportDuty, DeecDetails, DeecItem, DrawbackBasis,
    DrawbackDetails, EpcgDetails, EpcgItem, ItemType, LicenceRef, Manufacturer, OtherDetails,
    Product, ReExportDetails, ThirdParty,
};
pub use shipment::{CURRENT_SCHEMA_VERSION, Shipment};
