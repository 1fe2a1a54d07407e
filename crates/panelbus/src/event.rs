//! Event values published through the bus.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::context::EventContext;
use crate::kind::{EventKind, EventPayload};

/// An immutable event, dispatched once and then discarded.
///
/// An event pairs a concrete payload with zero or one [`EventContext`]. The
/// payload type determines the event's kind; subscribers downcast back to
/// the concrete type via [`Event::payload`]. Cloning shares the payload.
#[derive(Clone)]
pub struct Event {
    kind: EventKind,
    context: Option<EventContext>,
    payload: Arc<dyn Any + Send + Sync>,
    id: Uuid,
    timestamp: DateTime<Utc>,
}

impl Event {
    /// Create an event with no context, visible to subscribers of its kind
    /// regardless of their context filter.
    #[must_use]
    pub fn new<E: EventPayload>(payload: E) -> Self {
        Self::build(payload, None)
    }

    /// Create an event scoped to a context.
    #[must_use]
    pub fn with_context<E: EventPayload>(payload: E, context: EventContext) -> Self {
        Self::build(payload, Some(context))
    }

    fn build<E: EventPayload>(payload: E, context: Option<EventContext>) -> Self {
        Self {
            kind: EventKind::of::<E>(),
            context,
            payload: Arc::new(payload),
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }

    /// The kind used for routing this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The context this event is scoped to, if any.
    #[must_use]
    pub fn context(&self) -> Option<&EventContext> {
        self.context.as_ref()
    }

    /// Downcast the payload to its concrete type.
    ///
    /// Returns `None` when `E` is not the type the event was built from.
    #[must_use]
    pub fn payload<E: EventPayload>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }

    /// Unique diagnostic identifier for this event.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the event was created.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind.name())
            .field("context", &self.context)
            .field("id", &self.id)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}
