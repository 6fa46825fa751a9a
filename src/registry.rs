//! Signal registry.
//!
//! [`SignalHandler`] maps signal names to channels. Its own mutex guards
//! only the map: every operation resolves a channel, releases the registry
//! lock, then works under the channel's lock. Operations on different signals
//! therefore never wait on each other beyond the short lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::calldata::CallData;
use crate::channel::Channel;
use crate::config::SignalHandlerConfig;
use crate::error::{RegistryError, SignalResult, ValidationError};
use crate::observer::Observer;
use crate::subscription::Subscription;

/// Thread-safe registry of named signals.
///
/// Share it across threads behind an `Arc`. Dropping the registry (or calling
/// [`destroy`](Self::destroy)) releases every channel and observer without
/// invoking any of them.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// use obsignal::{CallData, Observer, SignalHandler};
///
/// let signals = SignalHandler::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&hits);
/// let observer = Observer::from_fn(move |_, _| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// signals.connect("on_tick", &observer).unwrap();
/// signals.emit("on_tick", &mut CallData::new());
/// signals.emit("unknown", &mut CallData::new());
///
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug)]
pub struct SignalHandler {
    cfg: SignalHandlerConfig,
    signals: Mutex<HashMap<String, Arc<Channel>>>,
}

impl SignalHandler {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        log::info!("Signal handler initialized.");
        Self::from_valid_config(SignalHandlerConfig::default())
    }

    /// Creates an empty registry, rejecting an unusable configuration.
    pub fn with_config(cfg: SignalHandlerConfig) -> SignalResult<Self> {
        if let Err(e) = cfg.validate() {
            log::error!("Couldn't create signal handler: {e}");
            return Err(e);
        }
        log::info!("Signal handler initialized ({cfg:?}).");
        Ok(Self::from_valid_config(cfg))
    }

    fn from_valid_config(cfg: SignalHandlerConfig) -> Self {
        Self {
            cfg,
            signals: Mutex::new(HashMap::new()),
        }
    }

    /// Configuration this registry was built with.
    #[must_use]
    pub const fn config(&self) -> &SignalHandlerConfig {
        &self.cfg
    }

    /// Tears the registry down. Equivalent to dropping it.
    pub fn destroy(self) {
        drop(self);
    }

    /// Connects `observer` to `signal`, creating the signal on first use.
    ///
    /// Connecting an identical observer twice has no further effect. Fails
    /// only if the signal does not exist yet and cannot be created; the name
    /// then stays unregistered.
    pub fn connect(&self, signal: &str, observer: &Observer) -> SignalResult<()> {
        let channel = self.find_or_create_channel(signal)?;
        channel.connect(observer);
        Ok(())
    }

    /// Connects `observer` and returns a guard that disconnects it on drop.
    ///
    /// If the same observer is already connected, the returned guard starts
    /// inactive and never disconnects it: the existing connection belongs to
    /// whoever made it.
    pub fn subscribe(&self, signal: &str, observer: Observer) -> SignalResult<Subscription> {
        let channel = self.find_or_create_channel(signal)?;
        let added = channel.connect(&observer);
        if !added {
            log::debug!("signal '{signal}': observer already connected, subscription inactive");
        }
        Ok(Subscription::new(channel, observer, added))
    }

    /// Disconnects the observer with the same identity. Unknown signals and
    /// absent observers are ignored.
    pub fn disconnect(&self, signal: &str, observer: &Observer) {
        match self.find_channel(signal) {
            Some(channel) => {
                channel.disconnect(observer);
            }
            None => log::trace!("disconnect from unknown signal '{signal}' ignored"),
        }
    }

    /// Invokes every observer of `signal`, in connection order, on this thread.
    ///
    /// Unknown signals are a no-op. Observers must not connect, disconnect or
    /// emit on `signal` themselves: the channel lock is not reentrant.
    pub fn emit(&self, signal: &str, params: &mut CallData) {
        match self.find_channel(signal) {
            Some(channel) => channel.emit(params),
            None => log::trace!("emit on unknown signal '{signal}' ignored"),
        }
    }

    /// Number of distinct signals created so far.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.lock_signals().len()
    }

    /// Whether `signal` has been created by an earlier connect.
    #[must_use]
    pub fn has_signal(&self, signal: &str) -> bool {
        self.lock_signals().contains_key(signal)
    }

    /// Observers currently connected to `signal`; zero for unknown signals.
    #[must_use]
    pub fn observer_count(&self, signal: &str) -> usize {
        self.find_channel(signal)
            .map_or(0, |channel| channel.observer_count())
    }

    /// Names of all created signals, sorted.
    #[must_use]
    pub fn signal_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_signals().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn find_channel(&self, name: &str) -> Option<Arc<Channel>> {
        self.lock_signals().get(name).cloned()
    }

    fn find_or_create_channel(&self, name: &str) -> SignalResult<Arc<Channel>> {
        let mut signals = self.lock_signals();
        if let Some(channel) = signals.get(name) {
            return Ok(Arc::clone(channel));
        }

        if let Err(e) = self.admit(name, signals.len()) {
            log::error!("Could not create signal '{name}': {e}");
            return Err(e);
        }

        let channel = Arc::new(Channel::new(name.to_string(), self.cfg.observer_capacity));
        signals.insert(name.to_string(), Arc::clone(&channel));
        log::debug!("signal '{name}' created ({} total)", signals.len());
        Ok(channel)
    }

    fn admit(&self, name: &str, existing: usize) -> SignalResult<()> {
        if name.is_empty() {
            return Err(ValidationError::EmptySignalName.into());
        }
        if name.len() > self.cfg.max_name_len {
            return Err(ValidationError::SignalNameTooLong {
                name: name.to_string(),
                max_length: self.cfg.max_name_len,
            }
            .into());
        }
        if let Some(max_signals) = self.cfg.max_signals {
            if existing >= max_signals {
                return Err(RegistryError::SignalLimitReached {
                    name: name.to_string(),
                    max_signals,
                }
                .into());
            }
        }
        Ok(())
    }

    fn lock_signals(&self) -> MutexGuard<'_, HashMap<String, Arc<Channel>>> {
        match self.signals.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("signal registry lock was poisoned; recovering");
                let guard = poisoned.into_inner();
                self.signals.clear_poison();
                guard
            }
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        let signals = match self.signals.get_mut() {
            Ok(signals) => signals,
            Err(poisoned) => poisoned.into_inner(),
        };
        log::info!("Signal handler destroyed ({} signal(s) released).", signals.len());
        signals.clear();
    }
}
