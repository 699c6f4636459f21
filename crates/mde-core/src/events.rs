//! Input and output events of the sync engine

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::record::RecordId;
use crate::view::View;

/// Events delivered to the engine by the UI collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A filter slider/selector changed value
    FilterChanged { name: String, filter: Filter },

    /// A filter returned to its fully permissive position
    FilterCleared { name: String },

    /// The hover/focus target changed (`None` = pointer left the chart)
    HoverChanged { record: Option<RecordId> },
}

/// The single consistent update emitted once per recompute cycle
///
/// `selection` is already reconciled against `view`: it is either `None` or
/// an id present in the view.
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    pub view: View,
    pub selection: Option<RecordId>,
}

/// Trait for collaborators that render the filtered view
///
/// Registered with [`crate::SyncEngine::subscribe`]; the chart and table
/// renderers each implement this and redraw from the update alone.
pub trait ViewSubscriber: Send + Sync {
    /// Called exactly once per completed recompute cycle
    fn on_view_updated(&self, update: &ViewUpdate);
}
