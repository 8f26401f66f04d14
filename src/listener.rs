//! Listener handles and identity semantics.
//!
//! A [`Listener`] is a cheaply clonable handle to a callable. Cloning a
//! handle never copies the callable itself, and every clone shares one
//! identity: removal from an [`Emitter`](crate::Emitter) matches listeners
//! by that identity, never by comparing the callables structurally. Two
//! separately constructed listeners wrapping the same closure body are
//! therefore distinct for removal purposes.

use std::fmt;
use std::sync::Arc;

/// A shared handle to an event listener callable.
///
/// `P` is the payload type the listener receives by reference on dispatch.
/// The wrapped callable must be `Send + Sync` so emitters and proxies
/// holding listeners stay shareable across threads.
pub struct Listener<P>(Arc<dyn Fn(&P) + Send + Sync>);

impl<P> Listener<P> {
    /// Wrap a callable in a new listener handle.
    pub fn new(f: impl Fn(&P) + Send + Sync + 'static) -> Self {
        Listener(Arc::new(f))
    }

    /// Invoke the listener with a payload.
    pub fn call(&self, payload: &P) {
        (self.0)(payload)
    }

    /// Whether two handles refer to the same underlying callable.
    ///
    /// Compares allocation identity (the data pointer), not the vtable and
    /// not the callable's captured state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

// Manual impl: a derive would wrongly require `P: Clone`.
impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Listener(Arc::clone(&self.0))
    }
}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0))
    }
}
