//! Listener trait and subscription records.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::context::EventContext;
use crate::dispatcher::EventDispatcher;
use crate::error::BusResult;
use crate::event::Event;
use crate::kind::{EventKind, EventPayload};

/// Trait for synchronous event consumers.
///
/// `notify` runs on the publisher's thread while the bus lock is held, so it
/// must return quickly and must not block indefinitely; a slow listener
/// stalls all other bus activity for the duration.
pub trait Listener: Send + Sync {
    /// Called for each matching event delivered to this listener.
    fn notify(&self, event: &Event);

    /// Optional name for diagnostics.
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// A registration record: the kind a consumer wants, an optional context
/// filter, and the consumer itself.
///
/// The consumer is held weakly — a subscription, registered or not, never
/// keeps its consumer alive. Once the consumer is dropped the registry
/// prunes the entry the next time it walks the collection.
///
/// A subscription with no context filter matches events of any context; a
/// filtered subscription matches only events carrying the reference-equal
/// context, plus events carrying no context at all.
#[derive(Clone)]
pub struct Subscription {
    kind: EventKind,
    context: Option<EventContext>,
    consumer: Weak<dyn Listener>,
}

impl Subscription {
    /// Subscription for kind `E` with no context filter.
    #[must_use]
    pub fn new<E: EventPayload>(consumer: Weak<dyn Listener>) -> Self {
        Self::for_kind(EventKind::of::<E>(), consumer, None)
    }

    /// Subscription for kind `E` filtered to one context.
    #[must_use]
    pub fn with_context<E: EventPayload>(consumer: Weak<dyn Listener>, context: EventContext) -> Self {
        Self::for_kind(EventKind::of::<E>(), consumer, Some(context))
    }

    /// Subscription for an already-resolved kind.
    #[must_use]
    pub fn for_kind(kind: EventKind, consumer: Weak<dyn Listener>, context: Option<EventContext>) -> Self {
        Self {
            kind,
            context,
            consumer,
        }
    }

    /// Subscription for a kind resolved by its declared tag.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BusError::UnknownKind`] when the tag has not been
    /// declared; no subscription is produced and nothing is registered.
    pub fn for_kind_name(
        name: &str,
        consumer: Weak<dyn Listener>,
        context: Option<EventContext>,
    ) -> BusResult<Self> {
        Ok(Self::for_kind(EventKind::resolve(name)?, consumer, context))
    }

    /// Register this subscription with the process-wide dispatcher and hand
    /// it back for later unregistration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BusError::Internal`] when the registry cannot be
    /// obtained. Unreachable in normal operation.
    pub fn subscribe(self) -> BusResult<Self> {
        EventDispatcher::global().register(self.clone())?;
        Ok(self)
    }

    /// The kind this subscription accepts.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The context filter, if any.
    #[must_use]
    pub fn context(&self) -> Option<&EventContext> {
        self.context.as_ref()
    }

    /// Whether the consumer is still reachable.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.consumer.strong_count() > 0
    }

    pub(crate) fn listener(&self) -> Option<Arc<dyn Listener>> {
        self.consumer.upgrade()
    }

    pub(crate) fn matches(&self, event: &Event) -> bool {
        if self.kind != event.kind() {
            return false;
        }
        match (event.context(), self.context.as_ref()) {
            (None, _) | (_, None) => true,
            (Some(event_ctx), Some(filter)) => event_ctx == filter,
        }
    }
}

/// Structural equality: same kind, same context identity (or both absent),
/// same consumer allocation.
impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.context == other.context
            && Weak::ptr_eq(&self.consumer, &other.consumer)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind.name())
            .field("context", &self.context)
            .field("alive", &self.is_alive())
            .finish()
    }
}
