use crate::api::{CampaignListQuery, CampaignReader, CampaignWriter};
use crate::domain::vaccination_campaign::{
    CampaignStatus, CampaignStatusUpdate, VaccinationCampaign,
};
use crate::dto::vaccination_campaign::{CampaignsPageData, CampaignsPageQuery};
use crate::forms::vaccination_campaign::CampaignForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult, normalize_filter, parse_id};

/// Loads the campaigns table of the admin console.
pub fn load_campaigns_page<R>(api: &R, query: CampaignsPageQuery) -> ServiceResult<CampaignsPageData>
where
    R: CampaignReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query = CampaignListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let search_query = normalize_filter(query.search);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }
    let status_filter = normalize_filter(query.status);
    if let Some(status) = &status_filter {
        list_query = list_query.status(status.clone());
    }

    let campaigns = api.list_campaigns(&list_query).map_err(|err| {
        log::error!("Failed to list vaccination campaigns: {err}");
        ServiceError::from(err)
    })?;

    Ok(CampaignsPageData {
        campaigns,
        search_query,
        status_filter,
    })
}

/// Fetches one campaign; `Ok(None)` when the backend does not know it.
pub fn load_campaign<R>(api: &R, campaign_id: &str) -> ServiceResult<Option<VaccinationCampaign>>
where
    R: CampaignReader + ?Sized,
{
    let id = parse_id(campaign_id)?;
    match api.get_campaign(&id) {
        Ok(campaign) => Ok(Some(campaign)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => {
            log::error!("Failed to load vaccination campaign {id}: {err}");
            Err(err.into())
        }
    }
}

pub fn create_campaign<R>(api: &R, form: &CampaignForm) -> ServiceResult<VaccinationCampaign>
where
    R: CampaignWriter + ?Sized,
{
    let campaign = form.to_new_campaign().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    api.create_campaign(&campaign).map_err(|err| {
        log::error!("Failed to create a vaccination campaign: {err}");
        ServiceError::from(err)
    })
}

/// Replaces the editable fields of a campaign still in draft or announced.
pub fn update_campaign<R>(
    api: &R,
    campaign_id: &str,
    form: &CampaignForm,
) -> ServiceResult<VaccinationCampaign>
where
    R: CampaignReader + CampaignWriter + ?Sized,
{
    let current = load_campaign(api, campaign_id)?.ok_or(ServiceError::NotFound)?;
    if !current.status.is_editable() {
        log::error!(
            "Refusing to edit vaccination campaign {} in status {}",
            current.id,
            current.status
        );
        return Err(ServiceError::Conflict(
            "Không thể chỉnh sửa chiến dịch đã bắt đầu hoặc đã kết thúc".to_string(),
        ));
    }

    let campaign = form.to_new_campaign().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    api.update_campaign(&current.id, &campaign).map_err(|err| {
        log::error!("Failed to update vaccination campaign {}: {err}", current.id);
        ServiceError::from(err)
    })
}

pub fn change_campaign_status<R>(
    api: &R,
    campaign_id: &str,
    status: CampaignStatus,
) -> ServiceResult<VaccinationCampaign>
where
    R: CampaignWriter + ?Sized,
{
    let id = parse_id(campaign_id)?;
    api.change_campaign_status(&id, &CampaignStatusUpdate { status })
        .map_err(|err| {
            log::error!("Failed to change status of vaccination campaign {id}: {err}");
            ServiceError::from(err)
        })
}

pub fn delete_campaign<R>(api: &R, campaign_id: &str) -> ServiceResult<()>
where
    R: CampaignWriter + ?Sized,
{
    let id = parse_id(campaign_id)?;
    api.delete_campaign(&id).map_err(|err| {
        log::error!("Failed to delete vaccination campaign {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::pagination::{Paginated, PaginationInfo};
    use chrono::NaiveDate;
    use serde_json::json;

    fn campaign(id: &str, status: &str) -> VaccinationCampaign {
        serde_json::from_value(json!({
            "_id": id,
            "title": "Tiêm phòng cúm",
            "vaccineName": "Influvac",
            "status": status
        }))
        .expect("valid campaign")
    }

    fn filled_form() -> CampaignForm {
        CampaignForm {
            title: "Tiêm phòng cúm".to_string(),
            vaccine_name: "Vaxigrip".to_string(),
            description: String::new(),
            target_grades: "1,2".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 11, 15),
        }
    }

    #[test]
    fn search_and_status_are_forwarded() {
        let mut api = MockApi::new();
        api.expect_list_campaigns()
            .withf(|query| {
                query.search.as_deref() == Some("cúm")
                    && query.status.as_deref() == Some("draft")
                    && query.limit == Some(DEFAULT_ITEMS_PER_PAGE)
            })
            .times(1)
            .returning(|_| Ok(Paginated::new(vec![campaign("v1", "draft")], PaginationInfo::derive(1, 1, 10))));

        let data = load_campaigns_page(
            &api,
            CampaignsPageQuery {
                search: Some(" cúm ".to_string()),
                status: Some("draft".to_string()),
                page: None,
            },
        )
        .expect("page loads");

        assert_eq!(data.campaigns.records.len(), 1);
        assert_eq!(data.search_query.as_deref(), Some("cúm"));
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let mut api = MockApi::new();
        api.expect_create_campaign().times(0);

        let result = create_campaign(&api, &CampaignForm::default());
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn ongoing_campaign_cannot_be_edited() {
        let mut api = MockApi::new();
        api.expect_get_campaign()
            .returning(|_| Ok(campaign("v1", "in_progress")));
        api.expect_update_campaign().times(0);

        let result = update_campaign(&api, "v1", &filled_form());
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn draft_campaign_is_updated() {
        let mut api = MockApi::new();
        api.expect_get_campaign()
            .returning(|_| Ok(campaign("v1", "draft")));
        api.expect_update_campaign()
            .withf(|id, payload| {
                id.as_str() == "v1" && payload.vaccine_name.as_str() == "Vaxigrip"
            })
            .times(1)
            .returning(|_, _| Ok(campaign("v1", "draft")));

        update_campaign(&api, "v1", &filled_form()).expect("campaign updated");
    }

    #[test]
    fn status_change_is_forwarded() {
        let mut api = MockApi::new();
        api.expect_change_campaign_status()
            .withf(|_, update| update.status == CampaignStatus::Announced)
            .times(1)
            .returning(|_, _| Ok(campaign("v1", "planned")));

        let updated =
            change_campaign_status(&api, "v1", CampaignStatus::Announced).expect("status changed");
        assert_eq!(updated.status, CampaignStatus::Announced);
    }
}
