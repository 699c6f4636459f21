//! Hover/focus selection state

use crate::record::RecordId;
use crate::view::View;

/// The currently focused (hovered) record, if any
///
/// `focus` accepts any id unconditionally; validity against the visible view
/// is established by `reconcile`, which the engine calls once per cycle.
/// Deferring validation keeps focus requests that race a filter change from
/// being silently rejected at the input boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    focused: Option<RecordId>,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus a record by id, unconditionally
    pub fn focus(&mut self, id: RecordId) {
        self.focused = Some(id);
    }

    /// Clear the focus
    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// The focused record id, if any
    pub fn focused(&self) -> Option<RecordId> {
        self.focused
    }

    /// Drop the focus if it is no longer visible in `view`
    ///
    /// Idempotent, and the only operation allowed to clear the selection as
    /// a side effect of someone else's change. After this call the focus is
    /// either `None` or an id present in `view` — never dangling.
    pub fn reconcile(&mut self, view: &View) {
        if let Some(id) = self.focused {
            if !view.contains(id) {
                self.focused = None;
            }
        }
    }
}
