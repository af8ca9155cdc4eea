//! Error conversion glue between layers.
//!
//! Value objects must not depend on the API or service error types, so the
//! conversions live here instead of next to [`TypeConstraintError`].

use crate::api::errors::ApiError;
use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(val: TypeConstraintError) -> Self {
        ApiError::InvalidRequest(val.to_string())
    }
}
