use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::{ChildListQuery, ChildReader, MedicalOrderListQuery, MedicalOrderReader};
use crate::dto::dashboard::DashboardPageData;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult};

/// Loads the parent dashboard: the parent's children, the first page of
/// their medical orders and a per-status tally of that page.
pub fn load_parent_dashboard<R>(api: &R, today: NaiveDate) -> ServiceResult<DashboardPageData>
where
    R: ChildReader + MedicalOrderReader + ?Sized,
{
    let children = api
        .list_children(&ChildListQuery::new())
        .map_err(|err| {
            log::error!("Failed to list children: {err}");
            ServiceError::from(err)
        })?
        .records;

    let orders = api
        .list_my_medical_orders(&MedicalOrderListQuery::new().paginate(1, DEFAULT_ITEMS_PER_PAGE))
        .map_err(|err| {
            log::error!("Failed to list medical orders: {err}");
            ServiceError::from(err)
        })?;

    let mut order_counts = BTreeMap::new();
    for order in &orders.records {
        *order_counts.entry(order.status.to_string()).or_insert(0) += 1;
    }
    let active_orders = orders
        .records
        .iter()
        .filter(|order| order.is_active_on(today))
        .count();

    Ok(DashboardPageData {
        children,
        orders,
        order_counts,
        active_orders,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::child::Child;
    use crate::domain::medical_order::MedicalOrder;
    use crate::pagination::{Paginated, PaginationInfo};
    use serde_json::json;

    fn child(id: &str) -> Child {
        serde_json::from_value(json!({"_id": id, "fullName": "Lê Minh"})).expect("valid child")
    }

    fn order(id: &str, status: &str) -> MedicalOrder {
        serde_json::from_value(json!({
            "_id": id,
            "childId": "c1",
            "startDate": "2024-10-01",
            "endDate": "2024-10-10",
            "status": status
        }))
        .expect("valid order")
    }

    #[test]
    fn counts_orders_per_status() {
        let mut api = MockApi::new();
        api.expect_list_children()
            .times(1)
            .returning(|_| Ok(Paginated::new(vec![child("c1")], PaginationInfo::default())));
        api.expect_list_my_medical_orders()
            .withf(|query| query.page == Some(1))
            .times(1)
            .returning(|_| {
                Ok(Paginated::new(
                    vec![
                        order("o1", "pending"),
                        order("o2", "approved"),
                        order("o3", "pending"),
                    ],
                    PaginationInfo::derive(3, 1, 10),
                ))
            });

        let today = NaiveDate::from_ymd_opt(2024, 10, 5).expect("valid date");
        let data = load_parent_dashboard(&api, today).expect("dashboard loads");

        assert_eq!(data.children.len(), 1);
        assert_eq!(data.order_counts.get("pending"), Some(&2));
        assert_eq!(data.order_counts.get("approved"), Some(&1));
        assert_eq!(data.active_orders, 1);
    }

    #[test]
    fn child_list_failure_aborts_loading() {
        let mut api = MockApi::new();
        api.expect_list_children()
            .returning(|_| Err(ApiError::Network("offline".to_string())));
        api.expect_list_my_medical_orders().times(0);

        let today = NaiveDate::from_ymd_opt(2024, 10, 5).expect("valid date");
        let result = load_parent_dashboard(&api, today);

        assert!(matches!(result, Err(ServiceError::Api(ApiError::Network(_)))));
    }
}
