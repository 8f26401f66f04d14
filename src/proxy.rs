//! Proxy listener facades: renamed, restricted views over a shared emitter.
//!
//! A proxy is built in two steps, mirroring its role as a reusable wiring
//! definition: [`proxy_listener`] takes an [`EventMap`] and returns a
//! [`ProxyFactory`]; [`ProxyFactory::bind`] applies that definition to a
//! concrete [`Emitter`] and yields the bound [`ProxyListener`]. One event
//! map can thus be bound to any number of emitters.
//!
//! The proxy tracks every listener it registers itself, and its removal
//! operations forward exactly that tracked set to the emitter. Listeners
//! registered directly on the emitter, or through another proxy, are never
//! touched — the property that makes several independent subsystems safe
//! over one shared emitter.

use crate::{Emitter, Error, Listener, Result};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A fixed mapping from event names to the method names a proxy exposes.
///
/// ```
/// use named_events::EventMap;
///
/// let map = EventMap::new()
///     .route("display", "onDisplayChange")
///     .route("select", "onSelect");
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventMap {
    /// `(event, method)` pairs, in definition order
    routes: Vec<(String, String)>,
}

impl EventMap {
    /// Create an empty event map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route exposing `event` under the proxy method `method`.
    pub fn route(mut self, event: impl Into<String>, method: impl Into<String>) -> Self {
        self.routes.push((event.into(), method.into()));
        self
    }

    /// Number of routes in the map.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the map has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over `(event, method)` routes in definition order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(e, m)| (e.as_str(), m.as_str()))
    }
}

impl<E, M, const N: usize> From<[(E, M); N]> for EventMap
where
    E: Into<String>,
    M: Into<String>,
{
    fn from(pairs: [(E, M); N]) -> Self {
        let mut map = EventMap::new();
        for (event, method) in pairs {
            map = map.route(event, method);
        }
        map
    }
}

/// Create a reusable proxy definition from an event map.
///
/// The returned factory can be [bound](ProxyFactory::bind) to any number of
/// emitters, each binding yielding an independent [`ProxyListener`].
pub fn proxy_listener(event_map: impl Into<EventMap>) -> ProxyFactory {
    ProxyFactory {
        map: event_map.into(),
    }
}

/// A reusable proxy definition: an [`EventMap`] waiting for an emitter.
#[derive(Debug, Clone)]
pub struct ProxyFactory {
    map: EventMap,
}

impl ProxyFactory {
    /// Bind this definition to an emitter, producing the proxy facade.
    ///
    /// The proxy holds a handle to the emitter, not ownership; the emitter
    /// remains fully usable directly and by other proxies.
    pub fn bind<P>(&self, emitter: &Emitter<P>) -> ProxyListener<P> {
        let mut methods = HashMap::with_capacity(self.map.len());
        let tracked = DashMap::with_capacity(self.map.len());
        for (event, method) in self.map.routes() {
            methods.insert(method.to_string(), event.to_string());
            tracked.insert(event.to_string(), Vec::new());
        }
        debug!(methods = methods.len(), "proxy bound to emitter");
        ProxyListener {
            emitter: emitter.clone(),
            methods,
            tracked,
        }
    }
}

/// A bound subscription facade over one emitter.
///
/// Exposes one registration method name per route in its [`EventMap`],
/// addressed by name through [`register`](ProxyListener::register), plus
/// the [`off`](ProxyListener::off) / [`off_all`](ProxyListener::off_all)
/// removal pair. Removal only ever affects listeners this proxy itself
/// registered.
pub struct ProxyListener<P> {
    emitter: Emitter<P>,
    /// Method name to event name, fixed at bind time
    methods: HashMap<String, String>,
    /// Event name to the listeners this proxy registered for it
    tracked: DashMap<String, Vec<Listener<P>>>,
}

impl<P> ProxyListener<P> {
    /// Register listeners through the proxy method named `method`.
    ///
    /// Appends the listeners to this proxy's tracked sequence for the
    /// routed event and forwards them to the emitter's `on`. Returns
    /// [`Error::UnknownMethod`] if the event map defined no such method.
    pub fn register<I>(&self, method: &str, listeners: I) -> Result<&Self>
    where
        I: IntoIterator<Item = Listener<P>>,
    {
        let event = self
            .methods
            .get(method)
            .ok_or_else(|| Error::unknown_method(method))?;

        let listeners: Vec<Listener<P>> = listeners.into_iter().collect();
        trace!(method, event = %event, count = listeners.len(), "proxy registration");

        self.tracked
            .entry(event.clone())
            .or_default()
            .extend(listeners.iter().cloned());
        self.emitter.on(event.clone(), listeners);
        Ok(self)
    }

    /// Remove from the emitter the listeners this proxy registered for
    /// `event`.
    ///
    /// Events outside this proxy's map, and mapped events with nothing
    /// registered through the proxy, are no-ops with the emitter state
    /// unaffected. The proxy's tracked sequence is left as-is: identity
    /// based removal makes re-removal harmless, and re-registering a
    /// tracked handle keeps working.
    pub fn off(&self, event: &str) -> &Self {
        if let Some(tracked) = self.tracked.get(event) {
            if !tracked.is_empty() {
                let listeners = tracked.value().clone();
                drop(tracked);
                debug!(event, count = listeners.len(), "proxy removal");
                self.emitter.off(event, &listeners);
            }
        }
        self
    }

    /// Perform the per-event removal for every event in this proxy's map.
    pub fn off_all(&self) -> &Self {
        let events: Vec<String> = self.tracked.iter().map(|e| e.key().clone()).collect();
        for event in events {
            self.off(&event);
        }
        self
    }

    /// The method names this proxy exposes, in no particular order.
    pub fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    /// The event names this proxy routes to, in no particular order.
    pub fn events(&self) -> Vec<String> {
        self.tracked.iter().map(|e| e.key().clone()).collect()
    }
}

impl<P> fmt::Debug for ProxyListener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyListener")
            .field("methods", &self.method_names())
            .field("emitter", &self.emitter)
            .finish()
    }
}
