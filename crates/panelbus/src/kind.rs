//! Nominal event-kind identity and the process-wide kind table.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{OnceLock, RwLock};

use crate::error::{BusError, BusResult};

/// Marker trait for concrete event payload types.
///
/// Implement this on every type published through the bus. The associated
/// tag is a stable, human-readable name used for diagnostics and for
/// name-based kind resolution; routing itself uses the type's identity.
pub trait EventPayload: Any + Send + Sync {
    /// Stable tag for this event kind.
    const NAME: &'static str;
}

/// Identity of an event kind, used for exact-match routing.
///
/// Two kinds are equal iff they denote the same concrete payload type.
/// Matching is nominal: a kind never matches a different type, related or
/// not, so routing stays unambiguous and O(1)-comparable.
#[derive(Clone, Copy)]
pub struct EventKind {
    id: TypeId,
    name: &'static str,
}

impl EventKind {
    /// The kind of payload type `E`.
    #[must_use]
    pub fn of<E: EventPayload>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::NAME,
        }
    }

    /// Declare payload type `E` in the process-wide kind table, making its
    /// tag resolvable by name. Declaring the same kind twice is harmless.
    pub fn declare<E: EventPayload>() -> Self {
        let kind = Self::of::<E>();
        let mut table = match table().write() {
            Ok(table) => table,
            Err(poisoned) => poisoned.into_inner(),
        };
        table.insert(E::NAME, kind);
        kind
    }

    /// Resolve a tag to a declared kind.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::UnknownKind`] if no payload type with this tag
    /// has been declared.
    pub fn resolve(name: &str) -> BusResult<Self> {
        let table = match table().read() {
            Ok(table) => table,
            Err(poisoned) => poisoned.into_inner(),
        };
        table.get(name).copied().ok_or_else(|| BusError::UnknownKind {
            name: name.to_owned(),
        })
    }

    /// Stable tag of this kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn table() -> &'static RwLock<HashMap<&'static str, EventKind>> {
    static TABLE: OnceLock<RwLock<HashMap<&'static str, EventKind>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

impl PartialEq for EventKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventKind {}

impl Hash for EventKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKind").field("name", &self.name).finish()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StatusChange;
    impl EventPayload for StatusChange {
        const NAME: &'static str = "status_change";
    }

    struct FrameSelection;
    impl EventPayload for FrameSelection {
        const NAME: &'static str = "frame_selection";
    }

    #[test]
    fn test_kinds_compare_by_type() {
        assert_eq!(EventKind::of::<StatusChange>(), EventKind::of::<StatusChange>());
        assert_ne!(EventKind::of::<StatusChange>(), EventKind::of::<FrameSelection>());
    }

    #[test]
    fn test_declare_and_resolve() {
        let declared = EventKind::declare::<StatusChange>();
        let resolved = EventKind::resolve("status_change").unwrap();

        assert_eq!(declared, resolved);
        assert_eq!(resolved.name(), "status_change");
    }

    #[test]
    fn test_resolve_unknown_tag_fails() {
        let err = EventKind::resolve("no_such_kind").unwrap_err();
        assert!(matches!(err, BusError::UnknownKind { name } if name == "no_such_kind"));
    }

    #[test]
    fn test_display_uses_tag() {
        assert_eq!(EventKind::of::<StatusChange>().to_string(), "status_change");
    }
}
