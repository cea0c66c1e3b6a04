//! # Framework Errors
//!
//! Transport-level failures shared by every store, plus the boxed entity error that
//! carries a store's own error type across the channel.

/// Errors produced by the actor plumbing.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is a transport error or when the boxed
    /// error is of a different type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("out of coupons")]
    struct CouponError;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct OtherError;

    #[test]
    fn test_downcast_entity_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(CouponError));
        assert_eq!(err.downcast_entity::<CouponError>().unwrap(), CouponError);
    }

    #[test]
    fn test_downcast_entity_keeps_mismatched_error() {
        let err = FrameworkError::EntityError(Box::new(OtherError));
        let back = err.downcast_entity::<CouponError>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn test_downcast_entity_passes_transport_errors_through() {
        let back = FrameworkError::ActorClosed
            .downcast_entity::<CouponError>()
            .unwrap_err();
        assert!(matches!(back, FrameworkError::ActorClosed));
    }
}
