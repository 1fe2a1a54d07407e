//! Context tokens scoping subscriptions and events to a logical channel.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

/// Opaque identity token for a logical channel on the bus.
///
/// A context lets publishers and subscribers that belong to the same
/// component instance (one viewer panel, one controller) find each other
/// without sharing any object reference beyond the token itself.
///
/// Identity is the token, not its contents: cloning shares identity, and two
/// contexts created with the same label remain distinguishable. Equality and
/// hashing never look at the label.
#[derive(Clone)]
pub struct EventContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    label: String,
    id: Uuid,
}

impl EventContext {
    /// Create a fresh context token with a human-readable label.
    ///
    /// The label is for diagnostics only and plays no part in matching.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                label: label.into(),
                id: Uuid::new_v4(),
            }),
        }
    }

    /// Human-readable label supplied at construction.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Unique diagnostic identifier for this context.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }
}

impl PartialEq for EventContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for EventContext {}

impl Hash for EventContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("label", &self.inner.label)
            .field("id", &self.inner.id)
            .finish()
    }
}
