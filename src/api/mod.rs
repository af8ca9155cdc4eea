//! Typed wrappers around the school health REST API.
//!
//! Each resource is exposed through a reader/writer trait pair implemented by
//! [`ApiClient`], so page services can be exercised against mocks.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::child::{Child, NewChild, UpdateChild};
use crate::domain::health_profile::{HealthProfile, HealthProfileUpdate};
use crate::domain::medical_order::{MedicalOrder, NewMedicalOrder, OrderStatusUpdate};
use crate::domain::types::RecordId;
use crate::domain::vaccination_campaign::{
    CampaignStatusUpdate, NewCampaign, UpdateCampaign, VaccinationCampaign,
};
use crate::envelope::{Envelope, PAGINATION_KEYS, extract_pagination_from_response, rejection};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, PaginationInfo};
use crate::transport::Transport;

use self::errors::{ApiError, ApiResult};

pub mod child;
pub mod errors;
pub mod health_profile;
pub mod medical_order;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod vaccination_campaign;

/// Entry point to the backend: a transport plus the page size used when a
/// query does not set one.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    page_size: u64,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Pagination defaults for a list call, seeded from the query.
    pub(crate) fn page_defaults(&self, page: Option<u64>, limit: Option<u64>) -> PaginationInfo {
        PaginationInfo {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(self.page_size).max(1),
            ..PaginationInfo::default()
        }
    }
}

/// Decodes a list response of any known envelope into typed records.
///
/// Unlike [`crate::envelope::extract_array_from_response`], an object that
/// carries no recognizable array is reported instead of read as "no records".
/// A keyed or wrapped array sent without any pagination field counts as one
/// complete page.
pub fn decode_page<T: DeserializeOwned>(
    response: &Value,
    data_key: Option<&str>,
    defaults: PaginationInfo,
) -> ApiResult<Paginated<T>> {
    if let Some(message) = rejection(response) {
        return Err(ApiError::Rejected(message));
    }

    let envelope = Envelope::classify(response, data_key);
    if let Envelope::Unrecognized(map) = envelope {
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        return Err(ApiError::Decode(format!(
            "unrecognized list envelope with keys {keys:?}"
        )));
    }

    let records = envelope
        .records()
        .iter()
        .map(|record| serde_json::from_value(record.clone()))
        .collect::<Result<Vec<T>, _>>()?;
    let pagination = match envelope {
        Envelope::Keyed { .. } | Envelope::Wrapped(_) if !carries_pagination(response) => {
            PaginationInfo::derive(records.len() as u64, defaults.page, defaults.limit)
        }
        _ => extract_pagination_from_response(response, defaults),
    };

    Ok(Paginated::new(records, pagination))
}

/// Whether the root object names any of the pagination fields.
fn carries_pagination(response: &Value) -> bool {
    response
        .as_object()
        .is_some_and(|root| PAGINATION_KEYS.iter().any(|key| root.contains_key(*key)))
}

/// Decodes a single-record response: `{data: {...}}`, `{isSuccess, data}` or
/// the bare record.
pub fn decode_record<T: DeserializeOwned>(response: &Value) -> ApiResult<T> {
    if let Some(message) = rejection(response) {
        return Err(ApiError::Rejected(message));
    }

    let record = match response {
        Value::Object(root) => match root.get("data") {
            Some(data @ Value::Object(_)) => data,
            Some(Value::Null) => return Err(ApiError::NotFound("Record not found".to_string())),
            _ => response,
        },
        Value::Null => return Err(ApiError::NotFound("Record not found".to_string())),
        _ => {
            return Err(ApiError::Decode(
                "expected a JSON object for a single record".to_string(),
            ));
        }
    };

    serde_json::from_value(record.clone()).map_err(ApiError::from)
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ChildListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: u64, limit: u64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalOrderListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_id: Option<String>,
}

impl MedicalOrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: u64, limit: u64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn child(mut self, child_id: &RecordId) -> Self {
        self.child_id = Some(child_id.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CampaignListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: u64, limit: u64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub trait ChildReader {
    fn list_children(&self, query: &ChildListQuery) -> ApiResult<Paginated<Child>>;
    fn get_child(&self, id: &RecordId) -> ApiResult<Child>;
}

pub trait ChildWriter {
    fn add_child(&self, new_child: &NewChild) -> ApiResult<Child>;
    fn update_child(&self, id: &RecordId, updates: &UpdateChild) -> ApiResult<Child>;
    fn delete_child(&self, id: &RecordId) -> ApiResult<()>;
}

pub trait MedicalOrderReader {
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

pub trait MedicalOrderWriter {
    fn create_medical_order(&self, order: &NewMedicalOrder) -> ApiResult<MedicalOrder>;
    fn update_medical_order_status(
        &self,
        id: &RecordId,
        update: &OrderStatusUpdate,
    ) -> ApiResult<MedicalOrder>;
    fn cancel_medical_order(&self, id: &RecordId) -> ApiResult<MedicalOrder>;
}

pub trait CampaignReader {
    fn list_campaigns(&self, query: &CampaignListQuery)
    -> ApiResult<Paginated<VaccinationCampaign>>;
    fn get_campaign(&self, id: &RecordId) -> ApiResult<VaccinationCampaign>;
}

pub trait CampaignWriter {
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

pub trait HealthProfileReader {
    fn get_health_profile(&self, child_id: &RecordId) -> ApiResult<HealthProfile>;
}

pub trait HealthProfileWriter {
    fn save_health_profile(
        &self,
        child_id: &RecordId,
        profile: &HealthProfileUpdate,
    ) -> ApiResult<HealthProfile>;
}
