use std::fmt::Debug;
use uuid::Uuid;

/// Identifier of every [`Resource`].
pub type ResourceId = i64;

/// A persistent entity that knows its own identifier.
///
/// The identifier is absent while the entity is transient and is assigned
/// exactly once by the persistence layer when the entity is created.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + Ord + Debug + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    #[inline]
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// An [`Entity`] keyed by a 64-bit numeric identifier.
pub trait Resource: Entity<Id = ResourceId> {
    fn reference(&self) -> Option<&str> {
        None
    }
}

/// Identifier-based equality: two entities are the same only once both are
/// persisted under the same identifier.
pub fn same_identity<E: Entity>(a: &E, b: &E) -> bool {
    match (a.id(), b.id()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Identifiers a backend is able to mint on its own.
pub trait GeneratedId: Sized {
    /// `seq` starts at 1 and grows by one for every generated identifier.
    /// `None` once the identifier space is exhausted.
    fn generate(seq: u64) -> Option<Self>;
}

impl GeneratedId for i64 {
    #[inline]
    fn generate(seq: u64) -> Option<Self> {
        i64::try_from(seq).ok()
    }
}

impl GeneratedId for Uuid {
    #[inline]
    fn generate(_seq: u64) -> Option<Self> {
        Some(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::models::SampleResource;

    #[test]
    fn test_same_identity() {
        let mut a = SampleResource::new("a");
        let mut b = SampleResource::new("a");
        assert!(!same_identity(&a, &b));

        a.set_id(7);
        assert!(!same_identity(&a, &b));

        b.set_id(7);
        assert!(same_identity(&a, &b));

        b.set_id(8);
        assert!(!same_identity(&a, &b));
    }

    #[test]
    fn test_generated_ids() {
        assert_eq!(i64::generate(1), Some(1));
        assert_eq!(i64::generate(42), Some(42));
        assert_eq!(i64::generate(i64::MAX as u64), Some(i64::MAX));
        assert_eq!(i64::generate(i64::MAX as u64 + 1), None);
        assert_eq!(i64::generate(u64::MAX), None);
        assert_ne!(Uuid::generate(1), Uuid::generate(1));
    }
}
