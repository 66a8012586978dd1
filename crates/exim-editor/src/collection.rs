//! Sequenced-collection operations.
//!
//! The same add/edit/delete idiom recurs across every nested table in the
//! editor: DEEC and EPCG licence items, ARE certificate rows, invoice
//! rows, payment-request charges and bills. This module is that idiom,
//! written once.
//!
//! Every operation is pure: it returns a new `Vec` and never mutates its
//! input, so a re-render-on-change caller stays correct by replacing the
//! parent's reference. Out-of-range removal is a no-op rather than a
//! panic: rapid UI events race in-flight deletions, and absorbing the
//! stale index is the expected outcome.

use exim_model::{AreDetailRow, DeecItem, EpcgItem, Product};

/// A row carrying a dense, 1-based serial number displayed to the user.
pub trait SequencedRow: Clone {
    /// A default row taking its place at `serial`.
    fn default_at(serial: u32) -> Self;

    fn serial(&self) -> u32;

    fn set_serial(&mut self, serial: u32);
}

/// What happens to surviving serial numbers after a removal.
///
/// Child tables (licence items, ARE rows) renumber so the display stays
/// dense. Top-level products keep their serials: those numbers appear on
/// previously printed paperwork and must stay stable as references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenumberPolicy {
    /// Renumber survivors to 1..=len.
    Dense,
    /// Leave serials untouched.
    Preserve,
}

/// Append one default row at serial `len + 1`.
pub fn append<E: SequencedRow>(rows: &[E]) -> Vec<E> {
    let mut next = rows.to_vec();
    next.push(E::default_at(rows.len() as u32 + 1));
    next
}

/// Apply `edit` to the row at `index`, materializing default rows through
/// `index` first if the backing array is shorter than the rendered table.
pub fn update_row<E: SequencedRow>(rows: &[E], index: usize, edit: impl FnOnce(&mut E)) -> Vec<E> {
    let mut next = rows.to_vec();
    while next.len() <= index {
        next.push(E::default_at(next.len() as u32 + 1));
    }
    edit(&mut next[index]);
    next
}

/// Remove the row at `index`. Out-of-range is a no-op; an emptied
/// collection is permitted (the "keep one row" rule some tables show is
/// display logic, not data logic).
pub fn remove_row<E: SequencedRow>(rows: &[E], index: usize, policy: RenumberPolicy) -> Vec<E> {
    if index >= rows.len() {
        return rows.to_vec();
    }
    let mut next = rows.to_vec();
    next.remove(index);
    if policy == RenumberPolicy::Dense {
        for (position, row) in next.iter_mut().enumerate() {
            row.set_serial(position as u32 + 1);
        }
    }
    next
}

// ----------------------------------------------------------------------------
// Position-keyed rows (no serial field)
// ----------------------------------------------------------------------------

/// Append a row produced by `make`.
pub fn append_with<E: Clone>(rows: &[E], make: impl FnOnce() -> E) -> Vec<E> {
    let mut next = rows.to_vec();
    next.push(make());
    next
}

/// Apply `edit` at `index`, materializing default rows through `index`.
pub fn update_row_with<E: Clone + Default>(
    rows: &[E],
    index: usize,
    edit: impl FnOnce(&mut E),
) -> Vec<E> {
    let mut next = rows.to_vec();
    while next.len() <= index {
        next.push(E::default());
    }
    edit(&mut next[index]);
    next
}

/// Remove the row at `index`; out-of-range is a no-op.
pub fn remove_row_at<E: Clone>(rows: &[E], index: usize) -> Vec<E> {
    if index >= rows.len() {
        return rows.to_vec();
    }
    let mut next = rows.to_vec();
    next.remove(index);
    next
}

// ----------------------------------------------------------------------------
// SequencedRow implementations
// ----------------------------------------------------------------------------

impl SequencedRow for DeecItem {
    fn default_at(serial: u32) -> Self {
        Self {
            serial_number: serial,
            ..Self::default()
        }
    }

    fn serial(&self) -> u32 {
        self.serial_number
    }

    fn set_serial(&mut self, serial: u32) {
        self.serial_number = serial;
    }
}

impl SequencedRow for EpcgItem {
    fn default_at(serial: u32) -> Self {
        Self {
            serial_number: serial,
            ..Self::default()
        }
    }

    fn serial(&self) -> u32 {
        self.serial_number
    }

    fn set_serial(&mut self, serial: u32) {
        self.serial_number = serial;
    }
}

impl SequencedRow for AreDetailRow {
    fn default_at(serial: u32) -> Self {
        Self {
            serial_number: serial,
            ..Self::default()
        }
    }

    fn serial(&self) -> u32 {
        self.serial_number
    }

    fn set_serial(&mut self, serial: u32) {
        self.serial_number = serial;
    }
}

impl SequencedRow for Product {
    fn default_at(serial: u32) -> Self {
        Product::with_serial(serial)
    }

    fn serial(&self) -> u32 {
        self.serial_number
    }

    fn set_serial(&mut self, serial: u32) {
        self.serial_number = serial;
    }
}
