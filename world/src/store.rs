//! Generic snapshot store with all-or-nothing dispatch.

use std::{error::Error, fmt, sync::Arc};

use tracing::{debug, trace, warn};

/// A closed set of actions and the transformation they apply to a state value.
///
/// The store hands the reducer a private draft. Anything written to the draft
/// becomes visible only if `reduce` returns `Ok`.
pub trait Reducer {
    /// State value owned by the store.
    type State: Clone;
    /// Actions accepted by [`Store::dispatch`].
    type Action: fmt::Debug;
    /// Notifications emitted alongside a committed state.
    type Event;
    /// Failure reported when an action cannot be applied.
    type Error: Error;

    /// Applies `action` to `draft`, recording events in `out_events`.
    fn reduce(
        &mut self,
        draft: &mut Self::State,
        action: Self::Action,
        out_events: &mut Vec<Self::Event>,
    ) -> Result<(), Self::Error>;
}

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<R> = Box<dyn FnMut(&Arc<<R as Reducer>::State>, &[<R as Reducer>::Event])>;

/// Single owner of a state value that publishes immutable snapshots.
pub struct Store<R: Reducer> {
    reducer: R,
    snapshot: Arc<R::State>,
    listeners: Vec<(SubscriptionId, Listener<R>)>,
    next_subscription: u64,
    revision: u64,
}

impl<R: Reducer> Store<R> {
    /// Creates a store publishing `initial` as its first snapshot.
    #[must_use]
    pub fn new(reducer: R, initial: R::State) -> Self {
        Self {
            reducer,
            snapshot: Arc::new(initial),
            listeners: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    /// Returns the current snapshot. Holding it never blocks later dispatches.
    #[must_use]
    pub fn read(&self) -> Arc<R::State> {
        Arc::clone(&self.snapshot)
    }

    /// Number of commits published since construction.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener invoked after every commit, in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<R::State>, &[R::Event]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Runs `action` against a fresh draft and publishes it on success.
    ///
    /// On failure the draft and any events it produced are dropped, listeners
    /// are not called and the previous snapshot stays current.
    pub fn dispatch(&mut self, action: R::Action) -> Result<Vec<R::Event>, R::Error> {
        trace!(?action, revision = self.revision, "dispatching");
        let mut draft = (*self.snapshot).clone();
        let mut events = Vec::new();

        if let Err(error) = self.reducer.reduce(&mut draft, action, &mut events) {
            warn!(%error, revision = self.revision, "dispatch rejected");
            return Err(error);
        }

        self.snapshot = Arc::new(draft);
        self.revision += 1;
        debug!(
            revision = self.revision,
            events = events.len(),
            "dispatch committed"
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.snapshot, &events);
        }

        Ok(events)
    }
}

impl<R: Reducer> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
