use crate::api::errors::ApiResult;
use crate::api::{ApiClient, HealthProfileReader, HealthProfileWriter, decode_record};
use crate::domain::health_profile::{HealthProfile, HealthProfileUpdate};
use crate::domain::types::RecordId;
use crate::transport::ApiRequest;

pub const HEALTH_PROFILES_PATH: &str = "/health-profiles/child";

impl HealthProfileReader for ApiClient {
    fn get_health_profile(&self, child_id: &RecordId) -> ApiResult<HealthProfile> {
        let response = self
            .transport()
            .send(&ApiRequest::get(format!("{HEALTH_PROFILES_PATH}/{child_id}")))?;
        decode_record(&response)
    }
}

impl HealthProfileWriter for ApiClient {
    fn save_health_profile(
        &self,
        child_id: &RecordId,
        profile: &HealthProfileUpdate,
    ) -> ApiResult<HealthProfile> {
        let request =
            ApiRequest::put(format!("{HEALTH_PROFILES_PATH}/{child_id}")).with_json(profile)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }
}
