//! # obsignal - in-process named signal bus
//!
//! obsignal decouples event producers from consumers inside one process.
//! Producers emit a named signal with a [`CallData`] payload; every observer
//! connected to that name runs synchronously, in connection order, on the
//! emitting thread.
//!
//! ## Core Concepts
//!
//! - **SignalHandler**: the registry, one channel per signal name
//! - **Channel**: the ordered, de-duplicated observer list of one signal
//! - **Observer**: a (handler, data) pair compared by reference identity
//! - **CallData**: ordered key/value parameters shared by all observers of one emission
//!
//! ## Locking
//!
//! The registry lock covers only the name lookup. Each channel has its own
//! lock, held for the full duration of connect, disconnect and emit. That lock
//! is not reentrant: an observer must never connect, disconnect or emit on its
//! own signal while it is being invoked.
//!
//! ## Usage
//!
//! ```rust
//! use obsignal::{CallData, Handler, Observer, ObserverData, SignalHandler};
//!
//! let signals = SignalHandler::new();
//!
//! let on_tick = Observer::with_data(
//!     Handler::new(|params, data| {
//!         let scale = data.downcast_ref::<i64>().copied().unwrap_or(1);
//!         let frame = params.get_int("frame").unwrap_or(0);
//!         params.set("scaled", frame * scale);
//!     }),
//!     ObserverData::new(10i64),
//! );
//!
//! signals.connect("on_tick", &on_tick)?;
//!
//! let mut params = CallData::new().with("frame", 3);
//! signals.emit("on_tick", &mut params);
//! assert_eq!(params.get_int("scaled"), Some(30));
//!
//! signals.disconnect("on_tick", &on_tick);
//! # Ok::<(), obsignal::SignalError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calldata;
mod channel;
pub mod config;
pub mod error;
pub mod observer;
pub mod registry;
pub mod subscription;
pub mod value;

pub use calldata::CallData;
pub use config::SignalHandlerConfig;
pub use error::{RegistryError, SignalError, SignalResult, ValidationError};
pub use observer::{Handler, HandlerFn, Observer, ObserverData};
pub use registry::SignalHandler;
pub use subscription::Subscription;
pub use value::Value;
