use crate::api::errors::{ApiError, ApiResult};
use crate::api::{
    ApiClient, CampaignListQuery, CampaignReader, CampaignWriter, decode_page, decode_record,
};
use crate::domain::types::RecordId;
use crate::domain::vaccination_campaign::{
    CampaignStatusUpdate, NewCampaign, UpdateCampaign, VaccinationCampaign,
};
use crate::envelope::rejection;
use crate::pagination::Paginated;
use crate::transport::ApiRequest;

pub const CAMPAIGNS_PATH: &str = "/vaccination-campaigns";

impl CampaignReader for ApiClient {
    fn list_campaigns(
        &self,
        query: &CampaignListQuery,
    ) -> ApiResult<Paginated<VaccinationCampaign>> {
        let request = ApiRequest::get(CAMPAIGNS_PATH).with_query(query)?;
        let response = self.transport().send(&request)?;
        decode_page(
            &response,
            Some("campaigns"),
            self.page_defaults(query.page, query.limit),
        )
    }

    fn get_campaign(&self, id: &RecordId) -> ApiResult<VaccinationCampaign> {
        let response = self
            .transport()
            .send(&ApiRequest::get(format!("{CAMPAIGNS_PATH}/{id}")))?;
        decode_record(&response)
    }
}

impl CampaignWriter for ApiClient {
    fn create_campaign(&self, campaign: &NewCampaign) -> ApiResult<VaccinationCampaign> {
        let request = ApiRequest::post(CAMPAIGNS_PATH).with_json(campaign)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn update_campaign(
        &self,
        id: &RecordId,
        campaign: &UpdateCampaign,
    ) -> ApiResult<VaccinationCampaign> {
        let request = ApiRequest::put(format!("{CAMPAIGNS_PATH}/{id}")).with_json(campaign)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn change_campaign_status(
        &self,
        id: &RecordId,
        update: &CampaignStatusUpdate,
    ) -> ApiResult<VaccinationCampaign> {
        let request =
            ApiRequest::put(format!("{CAMPAIGNS_PATH}/{id}/status")).with_json(update)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn delete_campaign(&self, id: &RecordId) -> ApiResult<()> {
        let response = self
            .transport()
            .send(&ApiRequest::delete(format!("{CAMPAIGNS_PATH}/{id}")))?;
        match rejection(&response) {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Ok(()),
        }
    }
}
