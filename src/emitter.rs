//! The named-event emitter: registration, synchronous dispatch, removal.

use crate::Listener;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A synchronous dispatcher for named events.
///
/// The emitter maps each event name to an ordered sequence of [`Listener`]
/// handles. Registration order is dispatch order, duplicates are kept (one
/// entry per registration), and removal matches by listener identity.
///
/// Cloning an `Emitter` yields another handle to the same registry, so one
/// emitter can be shared between producers, consumers, and any number of
/// [`ProxyListener`](crate::ProxyListener) facades. All operations take
/// `&self` and return `&Self` for chaining.
///
/// Internal locks are never held while listener code runs: `dispatch`
/// snapshots the sequence first, so listeners may freely call `on`, `off`,
/// or `dispatch` on the same emitter. Mutations made during a dispatch only
/// affect later dispatches.
pub struct Emitter<P> {
    /// Map from event name to its listeners, in registration order
    listeners: Arc<DashMap<String, Vec<Listener<P>>>>,
}

impl<P> Emitter<P> {
    /// Create a new emitter with no registrations.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    /// Create an emitter with pre-allocated capacity for event names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    /// Append `listeners`, in the order given, to the sequence for `event`.
    ///
    /// The event entry is created on first registration. There is no
    /// deduplication: registering the same handle twice yields two entries,
    /// each dispatched independently. Passing no listeners is a successful
    /// no-op.
    pub fn on<I>(&self, event: impl Into<String>, listeners: I) -> &Self
    where
        I: IntoIterator<Item = Listener<P>>,
    {
        let mut entry = self.listeners.entry(event.into()).or_default();
        let before = entry.len();
        entry.extend(listeners);

        trace!(
            event = %entry.key(),
            added = entry.len() - before,
            total = entry.len(),
            "listeners registered"
        );
        self
    }

    /// Synchronously invoke every listener registered for `event`, in
    /// registration order, passing `payload` to each.
    ///
    /// The sequence is snapshotted before the first invocation; listeners
    /// added or removed by a running listener take effect on the next
    /// dispatch. Unknown events are a no-op.
    ///
    /// There is no fault isolation: a panicking listener propagates to the
    /// caller and the remaining listeners of that dispatch are skipped.
    /// Consumers needing isolation must wrap their own listeners.
    pub fn dispatch(&self, event: &str, payload: &P) -> &Self {
        let snapshot = match self.listeners.get(event) {
            Some(entry) => entry.value().clone(),
            None => return self,
        };
        // Guard dropped: listeners may re-enter this emitter.
        trace!(event, count = snapshot.len(), "dispatching");
        for listener in &snapshot {
            listener.call(payload);
        }
        self
    }

    /// Remove listeners for `event`.
    ///
    /// With a non-empty slice, every occurrence of each given listener
    /// identity is removed from the event's sequence, preserving the
    /// relative order of the survivors. With an empty slice, the event's
    /// entire sequence is cleared. An event with no prior registrations is
    /// a no-op either way.
    pub fn off(&self, event: &str, listeners: &[Listener<P>]) -> &Self {
        if let Some(mut entry) = self.listeners.get_mut(event) {
            let before = entry.len();
            if listeners.is_empty() {
                entry.clear();
            } else {
                entry.retain(|registered| !listeners.iter().any(|l| l.ptr_eq(registered)));
            }
            debug!(event, removed = before - entry.len(), "listeners removed");
        }
        self
    }

    /// Remove all listeners for all events.
    pub fn off_all(&self) -> &Self {
        for mut entry in self.listeners.iter_mut() {
            entry.clear();
        }
        debug!("all listeners removed");
        self
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map(|l| l.len()).unwrap_or(0)
    }

    /// Total number of listeners across all events.
    pub fn total_listeners(&self) -> usize {
        self.listeners.iter().map(|entry| entry.len()).sum()
    }

    /// All event names that have seen a registration.
    ///
    /// Includes events whose sequences have since been cleared.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.iter().map(|e| e.key().clone()).collect()
    }
}

// Manual impls: derives would wrongly require bounds on `P`.
impl<P> Clone for Emitter<P> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.listeners.len())
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn counter() -> Arc<AtomicI64> {
        Arc::new(AtomicI64::new(0))
    }

    fn adding(counter: &Arc<AtomicI64>, factor: i64) -> Listener<i64> {
        let c = Arc::clone(counter);
        Listener::new(move |inc: &i64| {
            c.fetch_add(inc * factor, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let em = Emitter::new();

        let o = Arc::clone(&order);
        let first = Listener::new(move |_: &()| o.lock().unwrap().push("a"));
        let o = Arc::clone(&order);
        let second = Listener::new(move |_: &()| o.lock().unwrap().push("b"));

        em.on("foo", [first, second]).dispatch("foo", &());
        assert_eq!(*order.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_duplicate_registration_dispatches_twice() {
        let count = counter();
        let inc = adding(&count, 1);
        let em = Emitter::new();

        em.on("foo", [inc.clone(), inc.clone()]).dispatch("foo", &3);
        assert_eq!(count.load(Ordering::SeqCst), 6);

        // Identity removal drops both occurrences at once.
        em.off("foo", &[inc]).dispatch("foo", &3);
        assert_eq!(count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_off_other_listener_keeps_duplicates() {
        let count = counter();
        let inc = adding(&count, 1);
        let other = adding(&count, 10);
        let em = Emitter::new();

        em.on("foo", [inc.clone(), inc]);
        em.off("foo", &[other]);
        em.dispatch("foo", &1);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_off_preserves_relative_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let em = Emitter::new();

        let tag = |name: &'static str| {
            let o = Arc::clone(&order);
            Listener::new(move |_: &()| o.lock().unwrap().push(name))
        };
        let a = tag("a");
        let b = tag("b");
        let c = tag("c");

        em.on("foo", [a, b.clone(), c]);
        em.off("foo", &[b]);
        em.dispatch("foo", &());
        assert_eq!(*order.lock().unwrap(), ["a", "c"]);
    }

    #[test]
    fn test_off_event_clears_only_that_event() {
        let count = counter();
        let em = Emitter::new();

        em.on("foo", [adding(&count, 1), adding(&count, 2)]);
        em.on("bar", [adding(&count, -1)]);
        em.off("foo", &[]);

        em.dispatch("foo", &3);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        em.dispatch("bar", &200);
        assert_eq!(count.load(Ordering::SeqCst), -200);
    }

    #[test]
    fn test_off_all_clears_everything() {
        let count = counter();
        let em = Emitter::new();

        em.on("foo", [adding(&count, 1)]);
        em.on("bar", [adding(&count, -1)]);
        em.off_all();

        em.dispatch("foo", &3).dispatch("bar", &200);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let em: Emitter<i64> = Emitter::new();
        let stray = Listener::new(|_: &i64| {});
        em.dispatch("missing", &1).off("missing", &[stray]);
        assert_eq!(em.total_listeners(), 0);
    }

    #[test]
    fn test_on_with_no_listeners_succeeds() {
        let em: Emitter<i64> = Emitter::new();
        em.on("foo", []);
        assert_eq!(em.listener_count("foo"), 0);
    }

    #[test]
    fn test_cloned_handles_share_state() {
        let count = counter();
        let em = Emitter::new();
        let other_handle = em.clone();

        other_handle.on("foo", [adding(&count, 1)]);
        em.dispatch("foo", &5);
        assert_eq!(count.load(Ordering::SeqCst), 5);
        assert_eq!(em.listener_count("foo"), 1);
    }

    #[test]
    fn test_listener_may_mutate_during_dispatch() {
        // Snapshot rule: a listener removing itself still completes the
        // current round, and the removal holds for the next one.
        let count = counter();
        let em: Emitter<i64> = Emitter::new();

        let em_inner = em.clone();
        let c = Arc::clone(&count);
        let self_removing: Arc<std::sync::Mutex<Option<Listener<i64>>>> =
            Arc::new(std::sync::Mutex::new(None));
        let slot = Arc::clone(&self_removing);
        let listener = Listener::new(move |inc: &i64| {
            c.fetch_add(*inc, Ordering::SeqCst);
            if let Some(me) = slot.lock().unwrap().as_ref() {
                em_inner.off("foo", std::slice::from_ref(me));
            }
        });
        *self_removing.lock().unwrap() = Some(listener.clone());

        em.on("foo", [listener]);
        em.dispatch("foo", &3);
        em.dispatch("foo", &3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_introspection_counts() {
        let count = counter();
        let em = Emitter::new();
        em.on("foo", [adding(&count, 1), adding(&count, 2)]);
        em.on("bar", [adding(&count, 3)]);

        assert_eq!(em.listener_count("foo"), 2);
        assert_eq!(em.listener_count("bar"), 1);
        assert_eq!(em.total_listeners(), 3);

        let mut names = em.event_names();
        names.sort();
        assert_eq!(names, ["bar", "foo"]);
    }
}
