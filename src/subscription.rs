//! RAII connection guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::channel::Channel;
use crate::observer::Observer;

/// A connected observer that disconnects itself on drop.
///
/// A guard only ever removes a connection it created. Subscribing an
/// observer that is already connected yields an inactive guard.
///
/// Returned by [`SignalHandler::subscribe`](crate::SignalHandler::subscribe).
/// The guard keeps its channel alive, so it may safely outlive the registry.
///
/// Dropping a subscription takes its channel's lock: do not drop it from
/// inside an emission of the same signal.
#[derive(Debug)]
pub struct Subscription {
    channel: Arc<Channel>,
    observer: Observer,
    active: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(channel: Arc<Channel>, observer: Observer, active: bool) -> Self {
        Self {
            channel,
            observer,
            active: AtomicBool::new(active),
        }
    }

    /// Name of the subscribed signal.
    #[must_use]
    pub fn signal(&self) -> &str {
        self.channel.name()
    }

    /// Observer this guard connected.
    #[must_use]
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Whether this guard still owns a connection.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Explicit disconnection. Idempotent.
    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            self.channel.disconnect(&self.observer);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::{CallData, SignalHandler};

    #[test]
    fn test_drop_disconnects() {
        let signals = SignalHandler::new();
        let sub = signals
            .subscribe("on_tick", Observer::from_fn(|_, _| {}))
            .unwrap();
        assert_eq!(sub.signal(), "on_tick");
        assert_eq!(signals.observer_count("on_tick"), 1);

        drop(sub);
        assert_eq!(signals.observer_count("on_tick"), 0);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let signals = SignalHandler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = signals
            .subscribe(
                "on_tick",
                Observer::from_fn(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        signals.emit("on_tick", &mut CallData::new());
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());

        signals.emit("on_tick", &mut CallData::new());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_scoped_to_its_signal() {
        let signals = SignalHandler::new();
        let observer = Observer::from_fn(|_, _| {});
        let sub = signals.subscribe("a", observer.clone()).unwrap();
        let other = signals.subscribe("b", observer).unwrap();

        drop(sub);
        assert_eq!(signals.observer_count("a"), 0);
        assert_eq!(signals.observer_count("b"), 1);
        assert!(other.is_active());
    }

    #[test]
    fn test_subscribe_over_plain_connect_keeps_connection() {
        let signals = SignalHandler::new();
        let observer = Observer::from_fn(|_, _| {});
        signals.connect("s", &observer).unwrap();

        let sub = signals.subscribe("s", observer.clone()).unwrap();
        assert!(!sub.is_active());

        drop(sub);
        assert_eq!(signals.observer_count("s"), 1);
        signals.disconnect("s", &observer);
        assert_eq!(signals.observer_count("s"), 0);
    }

    #[test]
    fn test_second_subscription_of_same_observer_is_inactive() {
        let signals = SignalHandler::new();
        let observer = Observer::from_fn(|_, _| {});
        let first = signals.subscribe("t", observer.clone()).unwrap();
        let second = signals.subscribe("t", observer).unwrap();
        assert!(first.is_active());
        assert!(!second.is_active());

        // Only the owning guard releases the connection.
        drop(second);
        assert_eq!(signals.observer_count("t"), 1);
        drop(first);
        assert_eq!(signals.observer_count("t"), 0);
    }

    #[test]
    fn test_outlives_registry() {
        let signals = SignalHandler::new();
        let sub = signals
            .subscribe("late", Observer::from_fn(|_, _| {}))
            .unwrap();
        signals.destroy();
        drop(sub);
    }
}
