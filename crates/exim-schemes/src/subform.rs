use serde::{Deserialize, Serialize};
use std::fmt;

/// One compliance section of the product editor. Presence of the
/// conditional sections (`Deec`, `Epcg`, `Drawback`) depends on the
/// product's scheme code; the rest appear for every scheme.
///
/// Variant order here is not significant; display order comes from the
/// catalog's per-scheme lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subform {
    Main,
    General,
    Deec,
    Epcg,
    Drawback,
    CessExportDuty,
    AreDetails,
    ReExport,
    OtherDetails,
}

impl Subform {
    /// Display label, as printed on the tab strip.
    pub fn label(&self) -> &'static str {
        match self {
            Subform::Main => "Main",
            Subform::General => "General",
            Subform::Deec => "DEEC",
            Subform::Epcg => "EPCG",
            Subform::Drawback => "Drawback",
            Subform::CessExportDuty => "CessExport Duty",
            Subform::AreDetails => "AreDetails",
            Subform::ReExport => "Re-Export",
            Subform::OtherDetails => "Other Details",
        }
    }
}

impl fmt::Display for Subform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
