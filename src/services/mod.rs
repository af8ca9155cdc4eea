//! Page services: load the data of a page or apply a mutation through the
//! API traits, logging failures before handing them to the shell.

use crate::domain::types::RecordId;

pub mod child;
pub mod dashboard;
pub mod errors;
pub mod health_profile;
pub mod medical_order;
pub mod vaccination_campaign;

pub use errors::{ServiceError, ServiceResult};

/// Parses an identifier received from the shell (route segment or CLI
/// argument).
pub(crate) fn parse_id(raw: &str) -> ServiceResult<RecordId> {
    RecordId::new(raw).map_err(|err| {
        log::error!("Invalid record id {raw:?}: {err}");
        ServiceError::from(err)
    })
}

/// Trimmed filter value or `None` when blank.
pub(crate) fn normalize_filter(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
