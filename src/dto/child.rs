//! DTOs shaped for the child detail page.

use serde::Serialize;

use crate::domain::child::{Child, LookupSource};
use crate::domain::health_profile::HealthProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPageData {
    pub child: Child,
    /// Which lookup stage found the child.
    pub source: LookupSource,
    pub age: Option<u32>,
    /// `None` while the parent has not filled the profile in yet.
    pub profile: Option<HealthProfile>,
    pub bmi: Option<f64>,
}

/// Result of a child mutation so the shell can navigate to the record.
#[derive(Debug, Serialize)]
pub struct ChildOperationOutcome {
    pub child: Child,
}
