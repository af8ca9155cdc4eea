use serde::Serialize;

use crate::domain::vaccination_campaign::VaccinationCampaign;
use crate::pagination::Paginated;

/// Query parameters accepted by the admin campaigns page.
#[derive(Debug, Default, Clone)]
pub struct CampaignsPageQuery {
    /// Optional search string entered by the administrator.
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u64>,
}

/// Data required to render the campaigns table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignsPageData {
    pub campaigns: Paginated<VaccinationCampaign>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
}
