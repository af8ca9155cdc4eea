use crate::api::{HealthProfileReader, HealthProfileWriter};
use crate::domain::health_profile::HealthProfile;
use crate::forms::health_profile::HealthProfileForm;
use crate::services::{ServiceError, ServiceResult, parse_id};

/// Fetches the profile of a child; `Ok(None)` when none was saved yet.
pub fn load_health_profile<R>(api: &R, child_id: &str) -> ServiceResult<Option<HealthProfile>>
where
    R: HealthProfileReader + ?Sized,
{
    let id = parse_id(child_id)?;
    match api.get_health_profile(&id) {
        Ok(profile) => Ok(Some(profile)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => {
            log::error!("Failed to load health profile of child {id}: {err}");
            Err(err.into())
        }
    }
}

/// Validates the profile editor and stores the result for the child.
pub fn save_health_profile<R>(
    api: &R,
    child_id: &str,
    form: &HealthProfileForm,
) -> ServiceResult<HealthProfile>
where
    R: HealthProfileWriter + ?Sized,
{
    let id = parse_id(child_id)?;
    let update = form.to_update().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    api.save_health_profile(&id, &update).map_err(|err| {
        log::error!("Failed to save health profile of child {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use serde_json::json;

    fn profile() -> HealthProfile {
        serde_json::from_value(json!({"childId": "c1", "height": 120, "weight": 22}))
            .expect("valid profile")
    }

    #[test]
    fn missing_profile_is_none() {
        let mut api = MockApi::new();
        api.expect_get_health_profile()
            .returning(|_| Err(ApiError::NotFound("Health profile not found".to_string())));

        assert!(load_health_profile(&api, "c1").expect("no error").is_none());
    }

    #[test]
    fn saves_normalized_profile() {
        let mut api = MockApi::new();
        api.expect_save_health_profile()
            .withf(|id, update| {
                id.as_str() == "c1"
                    && update.blood_type.as_deref() == Some("AB")
                    && update.allergies == vec!["Sữa".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(profile()));

        let form = HealthProfileForm {
            blood_type: "ab".to_string(),
            allergies: "Sữa".to_string(),
            ..HealthProfileForm::default()
        };
        let saved = save_health_profile(&api, "c1", &form).expect("profile saved");
        assert!(saved.bmi().is_some());
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let mut api = MockApi::new();
        api.expect_save_health_profile().times(0);

        let form = HealthProfileForm {
            height: Some(1000.0),
            ..HealthProfileForm::default()
        };
        let result = save_health_profile(&api, "c1", &form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
