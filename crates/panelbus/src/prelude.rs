//! Prelude module - commonly used types for convenient import.
//!
//! Use `use panelbus::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use panelbus::prelude::*;
//!
//! struct FrameSelection {
//!     index: u32,
//! }
//! impl EventPayload for FrameSelection {
//!     const NAME: &'static str = "frame_selection";
//! }
//!
//! struct FrameLog;
//! impl Listener for FrameLog {
//!     fn notify(&self, event: &Event) {
//!         if let Some(selection) = event.payload::<FrameSelection>() {
//!             println!("frame {} selected", selection.index);
//!         }
//!     }
//! }
//!
//! let panel = EventContext::new("axial viewer");
//! let listener: Arc<dyn Listener> = Arc::new(FrameLog);
//!
//! let bus = EventDispatcher::new();
//! bus.register(Subscription::with_context::<FrameSelection>(
//!     Arc::downgrade(&listener),
//!     panel.clone(),
//! ))
//! .unwrap();
//! bus.dispatch(&Event::with_context(FrameSelection { index: 5 }, panel))
//!     .unwrap();
//! ```

// Dispatch engine
pub use crate::{EventDispatcher, Subscription};

// Events
pub use crate::{Event, EventContext, EventKind, EventPayload};

// Listener system
pub use crate::Listener;

// Errors
pub use crate::{BusError, BusResult};
