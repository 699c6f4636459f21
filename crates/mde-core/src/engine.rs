//! The filter-to-view synchronization engine

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::events::{InputEvent, ViewSubscriber, ViewUpdate};
use crate::filter::{Filter, FilterError, FilterSet};
use crate::record::RecordId;
use crate::selection::SelectionState;
use crate::store::RecordStore;
use crate::view::View;

/// Cycle state of the engine
#[derive(Debug, Clone, Copy, PartialEq)]
enum CycleState {
    Idle,
    Recomputing,
}

/// Mutable engine state, guarded by one lock
struct SyncState {
    filters: FilterSet,
    selection: SelectionState,
    cycle: CycleState,
    /// A mutation was applied since the last completed cycle
    pending: bool,
    /// Last computed view, served to late readers between cycles
    view: View,
}

/// Owns filter and selection state and keeps the chart and table views
/// consistent with them
///
/// Every filter change runs one full recompute-reconcile-emit cycle:
/// the view is recomputed from scratch over the whole store, the selection
/// is reconciled against it, and exactly one [`ViewUpdate`] goes out to all
/// registered subscribers. Cycles run to completion synchronously; inputs
/// delivered while a cycle's emit is in flight are coalesced into a single
/// follow-up cycle rather than processed concurrently.
pub struct SyncEngine {
    store: Arc<dyn RecordStore>,
    state: Arc<RwLock<SyncState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn ViewSubscriber>>>>,
}

impl SyncEngine {
    /// Create an engine over a loaded record store
    ///
    /// Starts with a permissive (empty) filter set and no selection; the
    /// initial view is the whole store. No update is emitted until an input
    /// arrives or [`refresh`](Self::refresh) is called.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let view = View::from_records(store.all());
        debug!(
            source = store.source_name(),
            records = store.len(),
            "sync engine created"
        );
        let state = SyncState {
            filters: FilterSet::new(),
            selection: SelectionState::new(),
            cycle: CycleState::Idle,
            pending: false,
            view,
        };
        Self {
            store,
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a view collaborator (held weakly)
    pub fn subscribe(&self, subscriber: Arc<dyn ViewSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Apply one input event and settle
    ///
    /// Filter mutations are validated here; a rejected mutation leaves all
    /// state untouched and emits nothing, but never prevents later cycles.
    /// `HoverChanged` only moves the focus — validation against the view is
    /// deferred to the next cycle's reconcile, so a hover racing a filter
    /// change is accepted now and cleared then.
    pub fn dispatch(&self, event: InputEvent) -> Result<(), FilterError> {
        let result = self.apply(event);
        self.settle();
        result
    }

    /// Apply a burst of queued input events, then run one coalesced cycle
    ///
    /// Exactly one [`ViewUpdate`] is emitted for the whole burst, reflecting
    /// the filter state after every event has been applied — subscribers
    /// never observe an intermediate view. The first rejected mutation is
    /// returned, but later events in the burst still apply and the cycle
    /// still runs for whatever applied.
    pub fn dispatch_all(
        &self,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Result<(), FilterError> {
        let mut first_error = None;
        for event in events {
            if let Err(err) = self.apply(event) {
                first_error.get_or_insert(err);
            }
        }
        self.settle();
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Force a full cycle with no mutation
    ///
    /// Recomputes the view from the store as-is and emits one update. This
    /// is the store-reload transition; it also serves hosts that register
    /// subscribers after construction and want them primed.
    pub fn refresh(&self) {
        self.state.write().pending = true;
        self.settle();
    }

    /// The view computed by the most recent cycle
    pub fn current_view(&self) -> View {
        self.state.read().view.clone()
    }

    /// The focused record id, if any
    pub fn focused(&self) -> Option<RecordId> {
        self.state.read().selection.focused()
    }

    /// The predicate currently set for `name`, if any
    pub fn current_filter(&self, name: &str) -> Option<Filter> {
        self.state.read().filters.get(name).cloned()
    }

    /// Apply one event's mutation without cycling
    fn apply(&self, event: InputEvent) -> Result<(), FilterError> {
        let mut state = self.state.write();
        match event {
            InputEvent::FilterChanged { name, filter } => {
                trace!(filter = %name, "filter changed");
                state.filters.set_filter(name, filter)?;
                state.pending = true;
            }
            InputEvent::FilterCleared { name } => {
                trace!(filter = %name, "filter cleared");
                if state.filters.remove_filter(&name).is_some() {
                    state.pending = true;
                }
            }
            InputEvent::HoverChanged { record } => {
                trace!(?record, "hover changed");
                match record {
                    Some(id) => state.selection.focus(id),
                    None => state.selection.clear(),
                }
            }
        }
        Ok(())
    }

    /// Run coalesced cycles until no mutation is pending
    ///
    /// If a cycle is already in flight (this call re-entered from a
    /// subscriber callback), the pending flag is left for the in-flight
    /// call's loop to consume after its emit returns.
    fn settle(&self) {
        loop {
            {
                let mut state = self.state.write();
                if state.cycle == CycleState::Recomputing {
                    return;
                }
                if !state.pending {
                    return;
                }
                state.cycle = CycleState::Recomputing;
                state.pending = false;
            }

            let update = {
                let mut state = self.state.write();
                let view = View::from_records(state.filters.filter(self.store.all()));
                state.selection.reconcile(&view);
                debug!(
                    total = self.store.len(),
                    visible = view.len(),
                    filters = state.filters.len(),
                    "recomputed view"
                );
                state.view = view.clone();
                ViewUpdate {
                    view,
                    selection: state.selection.focused(),
                }
            };

            // Emit with the state lock released so a subscriber may dispatch
            // further inputs; those set `pending` and are picked up by the
            // next loop iteration.
            self.notify_subscribers(&update);

            self.state.write().cycle = CycleState::Idle;
        }
    }

    /// Deliver one update to all live subscribers
    fn notify_subscribers(&self, update: &ViewUpdate) {
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        let live: Vec<_> = subscribers.iter().filter_map(Weak::upgrade).collect();
        drop(subscribers);

        for subscriber in live {
            subscriber.on_view_updated(update);
        }
    }
}
