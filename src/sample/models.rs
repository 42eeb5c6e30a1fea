use crate::resource::models::{same_identity, Entity, Resource, ResourceId};
use serde::{Deserialize, Serialize};

/// Minimal resource used to drive the service conformance checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleResource {
    pub id: Option<ResourceId>,
    pub reference: Option<String>,
}

impl SampleResource {
    #[inline]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: Some(reference.into()),
        }
    }
}

impl PartialEq for SampleResource {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (None, None) => self.reference == other.reference,
            _ => same_identity(self, other),
        }
    }
}

impl Eq for SampleResource {}

impl Entity for SampleResource {
    type Id = ResourceId;

    #[inline]
    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    #[inline]
    fn set_id(&mut self, id: ResourceId) {
        self.id = Some(id);
    }
}

impl Resource for SampleResource {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_identifier_based() {
        let mut a = SampleResource::new("sample-1");
        let mut b = SampleResource::new("sample-2");
        assert_ne!(a, b);

        a.id = Some(42);
        b.id = Some(42);
        assert_eq!(a, b);

        assert_ne!(a, SampleResource::new("sample-1"));

        b.id = Some(43);
        assert_ne!(a, b);
        assert_eq!(SampleResource::new("x"), SampleResource::new("x"));
    }

    #[test]
    fn test_reference() {
        assert_eq!(SampleResource::new("ref").reference(), Some("ref"));
        assert_eq!(SampleResource::default().reference(), None);
        assert!(!SampleResource::default().is_persisted());
    }
}
