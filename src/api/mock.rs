//! Mock API implementation for isolating page services in tests.

use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{
    CampaignListQuery, CampaignReader, CampaignWriter, ChildListQuery, ChildReader, ChildWriter,
    HealthProfileReader, HealthProfileWriter, MedicalOrderListQuery, MedicalOrderReader,
    MedicalOrderWriter,
};
use crate::domain::child::{Child, NewChild, UpdateChild};
use crate::domain::health_profile::{HealthProfile, HealthProfileUpdate};
use crate::domain::medical_order::{MedicalOrder, NewMedicalOrder, OrderStatusUpdate};
use crate::domain::types::RecordId;
use crate::domain::vaccination_campaign::{
    CampaignStatusUpdate, NewCampaign, UpdateCampaign, VaccinationCampaign,
};
use crate::pagination::Paginated;

mock! {
    pub Api {}

    impl ChildReader for Api {
        fn list_children(&self, query: &ChildListQuery) -> ApiResult<Paginated<Child>>;
        fn get_child(&self, id: &RecordId) -> ApiResult<Child>;
    }

    impl ChildWriter for Api {
        fn add_child(&self, new_child: &NewChild) -> ApiResult<Child>;
        fn update_child(&self, id: &RecordId, updates: &UpdateChild) -> ApiResult<Child>;
        fn delete_child(&self, id: &RecordId) -> ApiResult<()>;
    }

    impl MedicalOrderReader for Api {
        fn list_medical_orders(
            &self,
            query: &MedicalOrderListQuery,
        ) -> ApiResult<Paginated<MedicalOrder>>;
        fn list_my_medical_orders(
            &self,
            query: &MedicalOrderListQuery,
        ) -> ApiResult<Paginated<MedicalOrder>>;
        fn get_medical_order(&self, id: &RecordId) -> ApiResult<MedicalOrder>;
    }

    impl MedicalOrderWriter for Api {
        fn create_medical_order(&self, order: &NewMedicalOrder) -> ApiResult<MedicalOrder>;
        fn update_medical_order_status(
            &self,
            id: &RecordId,
            update: &OrderStatusUpdate,
        ) -> ApiResult<MedicalOrder>;
        fn cancel_medical_order(&self, id: &RecordId) -> ApiResult<MedicalOrder>;
    }

    impl CampaignReader for Api {
        fn list_campaigns(
            &self,
            query: &CampaignListQuery,
        ) -> ApiResult<Paginated<VaccinationCampaign>>;
        fn get_campaign(&self, id: &RecordId) -> ApiResult<VaccinationCampaign>;
    }

    impl CampaignWriter for Api {
        fn create_campaign(&self, campaign: &NewCampaign) -> ApiResult<VaccinationCampaign>;
        fn update_campaign(
            &self,
            id: &RecordId,
            campaign: &UpdateCampaign,
        ) -> ApiResult<VaccinationCampaign>;
        fn change_campaign_status(
            &self,
            id: &RecordId,
            update: &CampaignStatusUpdate,
        ) -> ApiResult<VaccinationCampaign>;
        fn delete_campaign(&self, id: &RecordId) -> ApiResult<()>;
    }

    impl HealthProfileReader for Api {
        fn get_health_profile(&self, child_id: &RecordId) -> ApiResult<HealthProfile>;
    }

    impl HealthProfileWriter for Api {
        fn save_health_profile(
            &self,
            child_id: &RecordId,
            profile: &HealthProfileUpdate,
        ) -> ApiResult<HealthProfile>;
    }
}
