#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("The entity could not be found")]
    EntityNotFound,
    #[error("An entity with the same unique attributes already exists")]
    EntityAlreadyExists,
    #[error("The entity has no identifier, it was never persisted")]
    EntityNotPersisted,
    #[error("The entity already has an identifier and cannot be created again")]
    EntityAlreadyPersisted,
    #[error("No identifier is left to assign")]
    IdentifierSpaceExhausted,
    #[error("Failed to create the test fixture: {0}")]
    FixtureCreationFailed(String),
    #[error("Failed to hash the password")]
    BcryptHashFailed,
    #[error("Failed to verify the password")]
    BcryptVerifyFailed,
    #[error("Something went wrong with the database")]
    SqlxError,
}

impl ServiceError {
    /// Whether the error comes from a violated persistence constraint rather
    /// than from the backend itself.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EntityAlreadyExists | Self::EntityAlreadyPersisted | Self::EntityNotPersisted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;

    #[test]
    fn test_conflict_classification() {
        assert!(ServiceError::EntityAlreadyExists.is_conflict());
        assert!(ServiceError::EntityNotPersisted.is_conflict());
        assert!(!ServiceError::EntityNotFound.is_conflict());
        assert!(!ServiceError::SqlxError.is_conflict());
    }
}
