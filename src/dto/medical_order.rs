use serde::Serialize;

use crate::domain::medical_order::MedicalOrder;
use crate::pagination::Paginated;

/// Query parameters accepted by the medical orders page.
#[derive(Debug, Default, Clone)]
pub struct OrdersPageQuery {
    pub page: Option<u64>,
    pub status: Option<String>,
    pub child_id: Option<String>,
    /// List only the orders of the signed-in parent.
    pub mine: bool,
}

/// Data required to render the medical orders table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPageData {
    pub orders: Paginated<MedicalOrder>,
    /// Status filter echoed back to the filter bar.
    pub status_filter: Option<String>,
    pub child_filter: Option<String>,
}
