//! Editing engine for export-shipment compliance and financial records.
//!
//! The repetitive CRUD surfaces of the surrounding application are out of
//! scope; this crate is the part with invariants to keep:
//!
//! - generic sequenced-collection operations with dense 1-based serials
//!   (`collection`)
//! - clone-on-path field updates over nested records (`path`)
//! - the product compliance controller, deriving applicable subforms from
//!   the scheme catalog (`compliance`)
//! - the financial ledger controllers, including three-level payment
//!   request nesting (`ledger`)
//! - the per-job session wiring controllers to debounced persistence
//!   (`session`)
//!
//! Failure philosophy: nothing here aborts an editing session. Unknown
//! scheme codes degrade to the default subform set, out-of-range indices
//! are absorbed, type-mismatched field writes keep the previous snapshot,
//! and failed saves stay dirty for the next window to retry.

pub mod collection;
pub mod compliance;
pub mod ledger;
pub mod path;
pub mod session;

pub use collection::{RenumberPolicy, SequencedRow};
pub use compliance::ProductComplianceController;
pub use ledger::{LedgerController, PaymentRequestController};
pub use path::{FieldPath, PathSegment, set_path, update_typed};
pub use session::EditorSession;
