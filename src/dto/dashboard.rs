use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::child::Child;
use crate::domain::medical_order::MedicalOrder;
use crate::pagination::Paginated;

/// Everything the parent dashboard shows on first load.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPageData {
    pub children: Vec<Child>,
    /// First page of the parent's medical orders.
    pub orders: Paginated<MedicalOrder>,
    /// Order count per status, keyed by the status as the backend spells it.
    pub order_counts: BTreeMap<String, usize>,
    /// Orders approved and covering today.
    pub active_orders: usize,
}
