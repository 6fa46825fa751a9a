//! Per-signal observer list.
//!
//! Internal to the crate; callers reach channels only through
//! [`SignalHandler`](crate::SignalHandler).
//!
//! A `Channel` serializes connect, disconnect and emit behind one mutex.
//! Emission holds that mutex for the whole fan-out, so an emission always sees
//! the observer list exactly as it was when the lock was taken.
//!
//! The mutex is not reentrant. An observer running inside `emit` must not
//! connect to, disconnect from, or emit on its own channel; that call blocks
//! on the lock the emitting thread already holds.

use std::sync::{Mutex, MutexGuard};

use crate::calldata::CallData;
use crate::observer::Observer;

/// Ordered, de-duplicated observers for one signal name.
#[derive(Debug)]
pub(crate) struct Channel {
    name: String,
    observers: Mutex<Vec<Observer>>,
}

impl Channel {
    pub(crate) fn new(name: String, capacity: usize) -> Self {
        Self {
            name,
            observers: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Signal name this channel serves.
    #[must_use]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Appends `observer` unless an identical one is already connected.
    ///
    /// Returns `true` if the observer was added. A repeated connect keeps the
    /// original position.
    pub(crate) fn connect(&self, observer: &Observer) -> bool {
        let mut observers = self.lock_observers();
        if observers.contains(observer) {
            return false;
        }
        observers.push(observer.clone());
        log::debug!(
            "signal '{}': observer connected ({} total)",
            self.name,
            observers.len()
        );
        true
    }

    /// Removes the observer with the same identity, if any.
    ///
    /// Returns `true` if an observer was removed.
    pub(crate) fn disconnect(&self, observer: &Observer) -> bool {
        let mut observers = self.lock_observers();
        let Some(idx) = observers.iter().position(|o| o == observer) else {
            return false;
        };
        observers.remove(idx);
        log::debug!(
            "signal '{}': observer disconnected ({} remaining)",
            self.name,
            observers.len()
        );
        true
    }

    /// Invokes every observer in connection order on the calling thread.
    ///
    /// A panicking observer is not caught; it unwinds through this call and
    /// the observers after it are skipped.
    pub(crate) fn emit(&self, params: &mut CallData) {
        let observers = self.lock_observers();
        log::trace!(
            "signal '{}': emitting to {} observer(s)",
            self.name,
            observers.len()
        );
        for observer in observers.iter() {
            observer.invoke(params);
        }
    }

    /// Number of connected observers.
    #[must_use]
    pub(crate) fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    // Only an observer panic can poison this lock, and emission never mutates
    // the list, so the recovered list is intact.
    fn lock_observers(&self) -> MutexGuard<'_, Vec<Observer>> {
        match self.observers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!(
                    "signal '{}': recovering observer list after a panicking observer",
                    self.name
                );
                let guard = poisoned.into_inner();
                self.observers.clear_poison();
                guard
            }
        }
    }
}
