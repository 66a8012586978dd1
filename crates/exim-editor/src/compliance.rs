//! Product compliance controller.
//!
//! Holds the authoritative in-memory product list for a shipment and the
//! currently selected product, derives which compliance subforms apply to
//! the selection, and routes nested-table edits to the collection
//! operations scoped to one product.

use exim_model::{DeecDetails, EpcgDetails, LicenceRef, Product};
use exim_schemes::{Subform, resolve_subforms};
use serde_json::Value;

use crate::collection::{self, RenumberPolicy, SequencedRow};
use crate::path::{FieldPath, update_typed};

/// Controller state for the product/compliance tabs.
///
/// Selection is controller state, not data: selecting a product changes
/// which subforms render next, never the records themselves. An index left
/// dangling by a removal degrades to "no product selected" rather than
/// panicking, because removal and selection race in the UI.
#[derive(Debug, Clone, Default)]
pub struct ProductComplianceController {
    products: Vec<Product>,
    selected: usize,
    /// Last derived (scheme code, subform list) pair; invalidated when the
    /// selected product's code changes.
    subform_memo: Option<(Option<String>, &'static [Subform])>,
}

impl ProductComplianceController {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            selected: 0,
            subform_memo: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected product, or `None` when the index is out of range.
    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    /// Select a product by index. Data is untouched; only the derived
    /// subform set changes.
    pub fn select_product(&mut self, index: usize) {
        self.selected = index;
    }

    /// The ordered subform tabs for the selected product, memoized on its
    /// scheme code so unrelated field edits don't recompute. Empty when no
    /// product is selected.
    pub fn derive_subforms(&mut self) -> &'static [Subform] {
        let Some(product) = self.products.get(self.selected) else {
            self.subform_memo = None;
            return &[];
        };

        if let Some((code, subforms)) = &self.subform_memo
            && *code == product.exim_code
        {
            return *subforms;
        }

        let code = product.exim_code.clone();
        let subforms = resolve_subforms(code.as_deref());
        self.subform_memo = Some((code, subforms));
        subforms
    }

    /// Append a blank product at serial `len + 1`. The new product has no
    /// scheme sub-records and is not auto-selected; selection stays
    /// explicit.
    pub fn add_product(&mut self) {
        self.products = collection::append(&self.products);
    }

    /// Remove a product. Serial numbers of the survivors are preserved;
    /// they reference previously printed paperwork. Out-of-range is a
    /// no-op.
    pub fn remove_product(&mut self, index: usize) {
        self.products = collection::remove_row(&self.products, index, RenumberPolicy::Preserve);
    }

    /// Apply a dotted-path field write to one product
    /// (e.g. `cessExpDuty.cenvat.date`). Returns whether the write was
    /// applied; an out-of-range index or a value that does not fit the
    /// record's shape is absorbed as a no-op.
    pub fn update_product_field(&mut self, index: usize, path: &FieldPath, value: Value) -> bool {
        let Some(current) = self.products.get(index) else {
            tracing::debug!(index, %path, "Dropped field write for missing product");
            return false;
        };
        match update_typed(current, path, value) {
            Some(next) => {
                self.products[index] = next;
                true
            }
            None => false,
        }
    }

    /// Typed closure variant of a product edit, for call sites that don't
    /// go through a path string. Out-of-range is a no-op.
    pub fn update_product(&mut self, index: usize, edit: impl FnOnce(&mut Product)) -> bool {
        let Some(current) = self.products.get(index) else {
            return false;
        };
        let mut next = current.clone();
        edit(&mut next);
        self.products[index] = next;
        true
    }

    // ------------------------------------------------------------------------
    // DEEC items
    // ------------------------------------------------------------------------

    pub fn add_deec_item(&mut self, product: usize) -> bool {
        self.update_product(product, |p| {
            let details = p.deec_details.get_or_insert_with(DeecDetails::default);
            details.deec_items = collection::append(&details.deec_items);
        })
    }

    pub fn update_deec_item(
        &mut self,
        product: usize,
        item: usize,
        edit: impl FnOnce(&mut exim_model::DeecItem),
    ) -> bool {
        self.update_product(product, |p| {
            let details = p.deec_details.get_or_insert_with(DeecDetails::default);
            details.deec_items = collection::update_row(&details.deec_items, item, edit);
        })
    }

    pub fn remove_deec_item(&mut self, product: usize, item: usize) -> bool {
        self.update_product(product, |p| {
            if let Some(details) = &mut p.deec_details {
                details.deec_items =
                    collection::remove_row(&details.deec_items, item, RenumberPolicy::Dense);
            }
        })
    }

    pub fn add_deec_licence_ref(&mut self, product: usize) -> bool {
        self.update_product(product, |p| {
            let details = p.deec_details.get_or_insert_with(DeecDetails::default);
            details.licence_refs =
                collection::append_with(&details.licence_refs, LicenceRef::default);
        })
    }

    pub fn update_deec_licence_ref(
        &mut self,
        product: usize,
        index: usize,
        edit: impl FnOnce(&mut LicenceRef),
    ) -> bool {
        self.update_product(product, |p| {
            let details = p.deec_details.get_or_insert_with(DeecDetails::default);
            details.licence_refs = collection::update_row_with(&details.licence_refs, index, edit);
        })
    }

    pub fn remove_deec_licence_ref(&mut self, product: usize, index: usize) -> bool {
        self.update_product(product, |p| {
            if let Some(details) = &mut p.deec_details {
                details.licence_refs = collection::remove_row_at(&details.licence_refs, index);
            }
        })
    }

    // ------------------------------------------------------------------------
    // EPCG items
    // ------------------------------------------------------------------------

    pub fn add_epcg_item(&mut self, product: usize) -> bool {
        self.update_product(product, |p| {
            let details = p.epcg_details.get_or_insert_with(EpcgDetails::default);
            details.epcg_items = collection::append(&details.epcg_items);
        })
    }

    pub fn update_epcg_item(
        &mut self,
        product: usize,
        item: usize,
        edit: impl FnOnce(&mut exim_model::EpcgItem),
    ) -> bool {
        self.update_product(product, |p| {
            let details = p.epcg_details.get_or_insert_with(EpcgDetails::default);
            details.epcg_items = collection::update_row(&details.epcg_items, item, edit);
        })
    }

    pub fn remove_epcg_item(&mut self, product: usize, item: usize) -> bool {
        self.update_product(product, |p| {
            if let Some(details) = &mut p.epcg_details {
                details.epcg_items =
                    collection::remove_row(&details.epcg_items, item, RenumberPolicy::Dense);
            }
        })
    }

    pub fn add_epcg_licence_ref(&mut self, product: usize) -> bool {
        self.update_product(product, |p| {
            let details = p.epcg_details.get_or_insert_with(EpcgDetails::default);
            details.licence_refs =
                collection::append_with(&details.licence_refs, LicenceRef::default);
        })
    }

    pub fn update_epcg_licence_ref(
        &mut self,
        product: usize,
        index: usize,
        edit: impl FnOnce(&mut LicenceRef),
    ) -> bool {
        self.update_product(product, |p| {
            let details = p.epcg_details.get_or_insert_with(EpcgDetails::default);
            details.licence_refs = collection::update_row_with(&details.licence_refs, index, edit);
        })
    }

    pub fn remove_epcg_licence_ref(&mut self, product: usize, index: usize) -> bool {
        self.update_product(product, |p| {
            if let Some(details) = &mut p.epcg_details {
                details.licence_refs = collection::remove_row_at(&details.licence_refs, index);
            }
        })
    }

    // ------------------------------------------------------------------------
    // ARE certificate rows
    // ------------------------------------------------------------------------

    pub fn add_are_row(&mut self, product: usize) -> bool {
        self.update_product(product, |p| {
            p.are_details = collection::append(&p.are_details);
        })
    }

    pub fn update_are_row(
        &mut self,
        product: usize,
        row: usize,
        edit: impl FnOnce(&mut exim_model::AreDetailRow),
    ) -> bool {
        self.update_product(product, |p| {
            p.are_details = collection::update_row(&p.are_details, row, edit);
        })
    }

    pub fn remove_are_row(&mut self, product: usize, row: usize) -> bool {
        self.update_product(product, |p| {
            p.are_details = collection::remove_row(&p.are_details, row, RenumberPolicy::Dense);
        })
    }
}
