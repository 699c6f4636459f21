//! Core functionality for the movie data explorer
//!
//! This crate provides the filter-to-view synchronization engine: it owns
//! the filter and selection state, recomputes the filtered view on every
//! filter change, and emits one consistent update per settled input burst
//! to the chart and table collaborators.

pub mod engine;
pub mod events;
pub mod filter;
pub mod record;
pub mod selection;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use engine::SyncEngine;
pub use events::{InputEvent, ViewSubscriber, ViewUpdate};
pub use filter::{Filter, FilterError, FilterSet};
pub use record::{FieldValue, Record, RecordId};
pub use selection::SelectionState;
pub use store::RecordStore;
pub use view::View;
