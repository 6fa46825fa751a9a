//! Observer identity.
//!
//! An [`Observer`] pairs a [`Handler`] with optional [`ObserverData`]. Both
//! halves compare by reference: two handlers are equal only if they are
//! clones of the same `Arc`, and two data tokens are equal only if they point
//! at the same allocation (or are both empty). Keep a clone of the observer
//! you connected if you intend to disconnect it later.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::calldata::CallData;

/// Callable invoked on emission.
pub type HandlerFn = dyn Fn(&mut CallData, &ObserverData) + Send + Sync;

/// Shared, reference-compared signal handler.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wraps a closure into a new handler with a fresh identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut CallData, &ObserverData) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", self.addr())
    }
}

/// Opaque caller data attached to an observer.
///
/// The bus only clones the `Arc`; it never reads or mutates the value.
#[derive(Clone, Default)]
pub struct ObserverData(Option<Arc<dyn Any + Send + Sync>>);

impl ObserverData {
    /// Empty data token. All empty tokens are equal.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Moves `value` into a new shared allocation.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Shares an existing allocation; identity follows the `Arc`.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        let value: Arc<dyn Any + Send + Sync> = value;
        Self(Some(value))
    }

    /// Whether no data is attached.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Typed view of the data, if present and of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    fn addr(&self) -> Option<*const ()> {
        self.0.as_ref().map(|v| Arc::as_ptr(v).cast::<()>())
    }
}

impl PartialEq for ObserverData {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ObserverData {}

impl fmt::Debug for ObserverData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr() {
            Some(ptr) => write!(f, "ObserverData({ptr:p})"),
            None => write!(f, "ObserverData(none)"),
        }
    }
}

/// A registered callback: (handler, data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observer {
    handler: Handler,
    data: ObserverData,
}

impl Observer {
    /// Observer without attached data.
    #[must_use]
    pub fn new(handler: Handler) -> Self {
        Self::with_data(handler, ObserverData::none())
    }

    /// Observer carrying `data`, handed back to `handler` on every emission.
    #[must_use]
    pub fn with_data(handler: Handler, data: ObserverData) -> Self {
        Self { handler, data }
    }

    /// Shorthand for `Observer::new(Handler::new(f))`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut CallData, &ObserverData) + Send + Sync + 'static,
    {
        Self::new(Handler::new(f))
    }

    /// Handler half of the identity.
    #[must_use]
    pub const fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Data half of the identity.
    #[must_use]
    pub const fn data(&self) -> &ObserverData {
        &self.data
    }

    pub(crate) fn invoke(&self, params: &mut CallData) {
        (self.handler.0)(params, &self.data);
    }
}
