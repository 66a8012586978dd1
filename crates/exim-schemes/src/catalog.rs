//! Scheme to subform applicability table.
//!
//! The table is declarative data, separated entirely from rendering: each
//! documented scheme code maps to a fixed, ordered subform list. Lookup is
//! pure and fail-open: an unknown or absent code yields the default list,
//! never an error, because blocking data entry on an unrecognized
//! directory value would be worse than showing a superset of optional
//! forms.

use crate::code::SchemeCode;
use crate::subform::Subform;

/// Subforms present for every scheme, in display order.
pub const DEFAULT_SUBFORMS: &[Subform] = &[
    Subform::Main,
    Subform::General,
    Subform::CessExportDuty,
    Subform::AreDetails,
    Subform::ReExport,
    Subform::OtherDetails,
];

const ADVANCE_LICENCE: &[Subform] = &[
    Subform::Main,
    Subform::General,
    Subform::Deec,
    Subform::CessExportDuty,
    Subform::AreDetails,
    Subform::ReExport,
    Subform::OtherDetails,
];

const DRAWBACK: &[Subform] = &[
    Subform::Main,
    Subform::General,
    Subform::Drawback,
    Subform::CessExportDuty,
    Subform::AreDetails,
    Subform::ReExport,
    Subform::OtherDetails,
];

const EPCG_WITH_DRAWBACK: &[Subform] = &[
    Subform::Main,
    Subform::General,
    Subform::Epcg,
    Subform::Drawback,
    Subform::CessExportDuty,
    Subform::AreDetails,
    Subform::ReExport,
    Subform::OtherDetails,
];

const EPCG_WITH_ADVANCE_LICENCE: &[Subform] = &[
    Subform::Main,
    Subform::General,
    Subform::Deec,
    Subform::Epcg,
    Subform::CessExportDuty,
    Subform::AreDetails,
    Subform::ReExport,
    Subform::OtherDetails,
];

/// The documented scheme codes: regulatory code, directory name, subforms.
const SCHEME_TABLE: &[(u16, &str, &[Subform])] = &[
    (3, "ADVANCE LICENCE", ADVANCE_LICENCE),
    (19, "DRAWBACK (DBK)", DRAWBACK),
    (21, "EOU/EPZ/SEZ/EHTP/STP", DEFAULT_SUBFORMS),
    (43, "DRAWBACK AND ZERO DUTY EPCG", EPCG_WITH_DRAWBACK),
    (50, "EPCG AND ADVANCE LICENCE", EPCG_WITH_ADVANCE_LICENCE),
    (60, "DRAWBACK AND ROSCTL", DRAWBACK),
    (61, "EPCG, DRAWBACK AND ROSCTL", EPCG_WITH_DRAWBACK),
    (99, "NO FOREIGN EXCHANGE INCENTIVE (NFEI)", DEFAULT_SUBFORMS),
];

/// Resolve the ordered subform list for a product's scheme code.
///
/// The returned order fixes left-to-right tab order in the UI and is
/// stable for a given code. Safe to call on every render.
pub fn resolve_subforms(code: Option<&str>) -> &'static [Subform] {
    let Some(parsed) = code.and_then(SchemeCode::parse) else {
        return DEFAULT_SUBFORMS;
    };
    SCHEME_TABLE
        .iter()
        .find(|(number, _, _)| *number == parsed.code)
        .map(|(_, _, subforms)| *subforms)
        .unwrap_or(DEFAULT_SUBFORMS)
}

/// The documented scheme codes, for directory screens.
pub fn known_codes() -> impl Iterator<Item = SchemeCode> {
    SCHEME_TABLE.iter().map(|(number, name, _)| SchemeCode {
        code: *number,
        name: (*name).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scheme_contains_the_default_six() {
        for (_, name, subforms) in SCHEME_TABLE {
            for required in DEFAULT_SUBFORMS {
                assert!(
                    subforms.contains(required),
                    "{name} is missing {required:?}"
                );
            }
        }
    }

    #[test]
    fn known_codes_are_unique_and_sorted() {
        let codes: Vec<u16> = known_codes().map(|c| c.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }
}
