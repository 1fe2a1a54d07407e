//! Panelbus - context-scoped synchronous event bus for viewer applications.
//!
//! This crate provides:
//! - A process-wide subscription registry with synchronous delivery
//! - Context tokens for scoping events to one panel or controller instance
//! - Weak subscriber ownership with lazy pruning of reclaimed consumers
//!
//! # Architecture
//!
//! Producers build an [`Event`] around a typed payload and hand it to an
//! [`EventDispatcher`]. Consumers implement [`Listener`] and register a
//! [`Subscription`] naming the payload kind they want, optionally filtered
//! to one [`EventContext`]. Dispatch walks the registry in registration
//! order on the publisher's thread and notifies every matching listener
//! whose consumer is still alive.
//!
//! The dispatcher holds consumers weakly: dropping the last strong reference
//! to a listener retires its subscriptions without any explicit
//! unregistration. Stale entries are collected lazily whenever the registry
//! is traversed.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use panelbus::{Event, EventDispatcher, EventPayload, Listener, Subscription};
//!
//! struct StatusChange {
//!     status: &'static str,
//! }
//! impl EventPayload for StatusChange {
//!     const NAME: &'static str = "status_change";
//! }
//!
//! struct StatusLog;
//! impl Listener for StatusLog {
//!     fn notify(&self, event: &Event) {
//!         if let Some(change) = event.payload::<StatusChange>() {
//!             println!("status is now {}", change.status);
//!         }
//!     }
//! }
//!
//! let bus = EventDispatcher::new();
//! let listener: Arc<dyn Listener> = Arc::new(StatusLog);
//!
//! bus.register(Subscription::new::<StatusChange>(Arc::downgrade(&listener)))
//!     .unwrap();
//! let delivered = bus
//!     .dispatch(&Event::new(StatusChange { status: "ready" }))
//!     .unwrap();
//! assert_eq!(delivered, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod dispatcher;
mod error;
mod event;
mod kind;
mod listener;

pub use context::EventContext;
pub use dispatcher::EventDispatcher;
pub use error::{BusError, BusResult};
pub use event::Event;
pub use kind::{EventKind, EventPayload};
pub use listener::{Listener, Subscription};
