//! The process-wide dispatch engine.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, MutexGuard, OnceLock};

use tracing::{debug, trace, warn};

use crate::context::EventContext;
use crate::error::{BusError, BusResult};
use crate::event::Event;
use crate::listener::Subscription;

static GLOBAL: OnceLock<EventDispatcher> = OnceLock::new();

/// Registry of live subscriptions and the synchronous delivery engine.
///
/// Subscriptions are kept in registration order, which is also delivery
/// order. Every operation takes one lock over the whole collection for its
/// full duration, so all bus activity is serialized process-wide and a slow
/// listener inside [`EventDispatcher::dispatch`] stalls every other caller.
/// Publishing from inside a `notify` callback therefore deadlocks; listeners
/// that need to publish must defer the work past the current dispatch.
///
/// Entries whose consumer has been reclaimed are pruned lazily whenever the
/// collection is walked, never by a background sweep.
pub struct EventDispatcher {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl EventDispatcher {
    /// Create a private dispatcher, independent of the global one.
    ///
    /// Prefer passing a dispatcher handle explicitly where possible; it
    /// keeps the dependency visible and testable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// The process-wide dispatcher, created lazily on first access.
    ///
    /// Concurrent first callers observe the same instance; there is no
    /// teardown — the dispatcher lives for the process lifetime.
    #[must_use]
    pub fn global() -> &'static EventDispatcher {
        GLOBAL.get_or_init(EventDispatcher::new)
    }

    fn subscriptions(&self) -> BusResult<MutexGuard<'_, Vec<Subscription>>> {
        self.subscriptions
            .lock()
            .map_err(|_| BusError::Internal("subscription registry lock poisoned"))
    }

    /// Append a subscription to the registry.
    ///
    /// Duplicate registrations are permitted; each one fires independently.
    /// Reclaimed entries encountered on the way are pruned.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Internal`] when the registry cannot be obtained.
    pub fn register(&self, subscription: Subscription) -> BusResult<()> {
        let mut subs = self.subscriptions()?;
        subs.retain(Subscription::is_alive);

        debug!(kind = %subscription.kind(), "listener registered");
        subs.push(subscription);
        Ok(())
    }

    /// Remove the first registered subscription structurally equal to the
    /// given one. Returns whether an entry was removed.
    ///
    /// Reclaimed entries encountered while traversing are pruned as a side
    /// effect, not reported as removals.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Internal`] when the registry cannot be obtained.
    pub fn unregister(&self, subscription: &Subscription) -> BusResult<bool> {
        let mut subs = self.subscriptions()?;
        subs.retain(Subscription::is_alive);

        if let Some(position) = subs.iter().position(|s| s == subscription) {
            subs.remove(position);
            debug!(kind = %subscription.kind(), "listener unregistered");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove every subscription whose context filter is the given context.
    ///
    /// `None` is a no-op: it never means "remove context-less
    /// subscriptions". Returns the number of context-matched removals.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Internal`] when the registry cannot be obtained.
    pub fn unregister_all_for_context(&self, context: Option<&EventContext>) -> BusResult<usize> {
        let Some(context) = context else {
            return Ok(0);
        };

        let mut subs = self.subscriptions()?;
        subs.retain(Subscription::is_alive);

        let before = subs.len();
        subs.retain(|s| s.context() != Some(context));
        let removed = before.saturating_sub(subs.len());

        if removed > 0 {
            debug!(context = context.label(), removed, "context listeners unregistered");
        }
        Ok(removed)
    }

    /// Deliver an event synchronously to every matching live subscription,
    /// in registration order, on the calling thread.
    ///
    /// A subscription matches when its kind equals the event's kind and the
    /// context rule holds: the event carries no context, or the subscription
    /// has no filter, or the filter is the event's context. Entries whose
    /// consumer has been reclaimed are pruned without being notified.
    ///
    /// A panicking listener does not abort the broadcast: the panic is
    /// caught, logged, and delivery continues with the next entry. Returns
    /// the number of listeners whose callback was invoked, counting those
    /// that panicked mid-callback.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Internal`] when the registry cannot be obtained.
    pub fn dispatch(&self, event: &Event) -> BusResult<usize> {
        let mut subs = self.subscriptions()?;
        trace!(kind = %event.kind(), event_id = %event.id(), "dispatching event");

        let mut delivered = 0usize;
        subs.retain(|sub| {
            let Some(listener) = sub.listener() else {
                trace!(kind = %sub.kind(), "pruning reclaimed listener");
                return false;
            };
            if sub.matches(event) {
                trace!(listener = listener.name(), kind = %event.kind(), "notifying listener");
                let outcome = catch_unwind(AssertUnwindSafe(|| listener.notify(event)));
                if outcome.is_err() {
                    warn!(
                        listener = listener.name(),
                        kind = %event.kind(),
                        "listener panicked during notify"
                    );
                }
                delivered = delivered.saturating_add(1);
            }
            true
        });

        Ok(delivered)
    }

    /// Number of registered entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.lock().map(|s| s.len()).unwrap_or_default()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscription_count", &self.len())
            .finish()
    }
}
