//! # named-events
//!
//! A small, synchronous named-event primitive: an [`Emitter`] that fans
//! dispatches out to registered listeners, and a [`ProxyListener`] facade
//! that renames and restricts subscriptions over a shared emitter.
//!
//! ## Features
//!
//! - **Synchronous** in-line dispatch, in strict registration order
//! - **Identity-based** removal: listeners are shared handles, matched by
//!   identity rather than structural equality
//! - **Shareable** emitters: cloning an emitter clones a handle to the same
//!   registry, safe to hand to multiple subsystems
//! - **Scoped cleanup** through proxies: each proxy removes only what it
//!   registered, never a neighbor's listeners
//!
//! ## Quick Example
//!
//! ```rust
//! use named_events::{proxy_listener, Emitter, Listener};
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use std::sync::Arc;
//!
//! let hits = Arc::new(AtomicI64::new(0));
//! let em: Emitter<i64> = Emitter::new();
//!
//! // Register directly on the emitter.
//! let h = Arc::clone(&hits);
//! em.on("tick", [Listener::new(move |n: &i64| {
//!     h.fetch_add(*n, Ordering::SeqCst);
//! })]);
//!
//! // Or through a renamed facade over the same emitter.
//! let proxy = proxy_listener([("tick", "onTick")]).bind(&em);
//! let h = Arc::clone(&hits);
//! proxy.register("onTick", [Listener::new(move |n: &i64| {
//!     h.fetch_add(n * 10, Ordering::SeqCst);
//! })])?;
//!
//! em.dispatch("tick", &3);
//! assert_eq!(hits.load(Ordering::SeqCst), 33);
//!
//! // The proxy's cleanup leaves the direct registration in place.
//! proxy.off_all();
//! em.dispatch("tick", &3);
//! assert_eq!(hits.load(Ordering::SeqCst), 36);
//! # Ok::<(), named_events::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]

/// Listener handles and identity semantics
pub mod listener;

/// Error types and result aliases
pub mod error;

/// The named-event emitter: registration, dispatch, removal
pub mod emitter;

/// Proxy listener facades over a shared emitter
pub mod proxy;

// Re-export commonly used types
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use listener::Listener;
pub use proxy::{proxy_listener, EventMap, ProxyFactory, ProxyListener};

/// Prelude module for convenient imports
///
/// # Example
/// ```rust
/// use named_events::prelude::*;
/// ```
pub mod prelude {
    pub use crate::emitter::Emitter;
    pub use crate::error::{Error, Result};
    pub use crate::listener::Listener;
    pub use crate::proxy::{proxy_listener, EventMap, ProxyListener};
}
