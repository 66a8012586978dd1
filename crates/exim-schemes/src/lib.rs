#![deny(unsafe_code)]

//! Export-incentive scheme catalog.
//!
//! Maps a product's scheme code (EXIM code) to the ordered list of
//! compliance subforms applicable to it. Pure lookup over static tables;
//! no state, no I/O.

mod catalog;
mod code;
mod subform;

pub use catalog::{DEFAULT_SUBFORMS, known_codes, resolve_subforms};
pub use code::SchemeCode;
pub use subform::Subform;
