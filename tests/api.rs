use school_health::api::child::find_child_by_id;
use school_health::api::errors::ApiError;
use school_health::api::{
    CampaignListQuery, CampaignReader, CampaignWriter, ChildListQuery, ChildReader, ChildWriter,
    HealthProfileReader, MedicalOrderListQuery, MedicalOrderReader, MedicalOrderWriter,
};
use school_health::domain::child::LookupSource;
use school_health::domain::medical_order::OrderStatus;
use school_health::domain::types::RecordId;
use school_health::pagination::PaginationInfo;
use school_health::transport::Method;
use serde_json::json;

use common::{Reply, stub_client};

mod common;

fn id(raw: &str) -> RecordId {
    RecordId::new(raw).expect("valid id")
}

#[test]
fn child_list_reads_keyed_envelope() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/childs/all",
        json!({
            "isSuccess": true,
            "children": [
                {"_id": "c1", "fullName": "Đỗ Gia Huy", "class": "4A"},
                {"_id": "c2", "name": "Đỗ Gia Hân"}
            ]
        }),
    );

    let page = api
        .list_children(&ChildListQuery::new().paginate(1, 5).search("Đỗ"))
        .expect("children listed");

    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].class_name.as_deref(), Some("4A"));
    assert_eq!(page.records[1].full_name.as_str(), "Đỗ Gia Hân");
    assert_eq!(page.pagination, PaginationInfo::derive(2, 1, 5));

    let request = stub.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(
        request.query.as_deref(),
        Some("page=1&limit=5&search=%C4%90%E1%BB%97")
    );
}

#[test]
fn empty_query_sends_no_query_string() {
    let (api, stub) = stub_client();
    stub.json(Method::Get, "/childs/all", json!([]));

    api.list_children(&ChildListQuery::new()).expect("children listed");

    let request = stub.last_request();
    assert_eq!(request.query, None);
    assert_eq!(request.path_and_query(), "/childs/all");
}

#[test]
fn lookup_prefers_detail_endpoint() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/child/c1",
        json!({"data": {"_id": "c1", "fullName": "Vũ Khánh"}}),
    );

    let lookup = find_child_by_id(&api, &id("c1")).expect("child found");

    assert_eq!(lookup.source, LookupSource::Detail);
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn lookup_scans_list_when_detail_fails() {
    let (api, stub) = stub_client();
    stub.reply(
        Method::Get,
        "/child/c2",
        Reply::Status(500, "Internal Server Error".to_string()),
    );
    stub.json(
        Method::Get,
        "/childs/all",
        json!({"data": [{"_id": "c1", "fullName": "A"}, {"_id": "c2", "fullName": "B"}]}),
    );

    let lookup = find_child_by_id(&api, &id("c2")).expect("child found");

    assert_eq!(lookup.source, LookupSource::ListScan);
    assert_eq!(lookup.child.full_name.as_str(), "B");
    let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/child/c2", "/childs/all"]);
}

#[test]
fn lookup_reports_missing_child() {
    let (api, stub) = stub_client();
    stub.reply(Method::Get, "/child/c9", Reply::Offline);
    stub.json(Method::Get, "/childs/all", json!({"data": []}));

    let err = find_child_by_id(&api, &id("c9")).expect_err("child missing");

    assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "Child not found"));
}

#[test]
fn lookup_propagates_list_failure() {
    let (api, stub) = stub_client();
    stub.reply(Method::Get, "/child/c9", Reply::Offline);
    stub.reply(Method::Get, "/childs/all", Reply::Offline);

    let err = find_child_by_id(&api, &id("c9")).expect_err("list failed");

    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn delete_child_surfaces_rejection() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Delete,
        "/child/delete/c1",
        json!({"isSuccess": false, "message": "Không thể xóa"}),
    );

    let err = api.delete_child(&id("c1")).expect_err("rejected");
    assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "Không thể xóa"));
}

#[test]
fn order_list_reads_paged_envelope() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/medical-orders",
        json!({
            "data": {
                "records": [{"_id": "o1", "childId": "c1", "status": "approved"}],
                "total": 21,
                "page": 3,
                "limit": 10,
                "totalPages": 3
            }
        }),
    );

    let page = api
        .list_medical_orders(
            &MedicalOrderListQuery::new()
                .paginate(3, 10)
                .status("approved")
                .child(&id("c1")),
        )
        .expect("orders listed");

    assert_eq!(page.records[0].status, OrderStatus::Approved);
    assert_eq!(page.pagination, PaginationInfo::derive(21, 3, 10));
    assert_eq!(
        stub.last_request().query.as_deref(),
        Some("page=3&limit=10&status=approved&childId=c1")
    );
}

#[test]
fn order_list_tolerates_null_status_and_oversized_page() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/medical-orders",
        json!({
            "data": {
                "records": [
                    {"_id": "o1", "childId": "c1", "status": null},
                    {"_id": "o2", "childId": "c1", "status": "approved"}
                ],
                "total": 2,
                "page": 1e30,
                "limit": 10,
                "totalPages": 1
            }
        }),
    );

    let page = api
        .list_medical_orders(&MedicalOrderListQuery::new())
        .expect("orders listed");

    assert_eq!(page.records[0].status, OrderStatus::Pending);
    assert_eq!(page.records[1].status, OrderStatus::Approved);
    assert_eq!(page.pages, vec![Some(1)]);
}

#[test]
fn my_orders_use_dedicated_path() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/medical-orders/my-orders",
        json!({"orders": [{"_id": "o1", "childId": "c1"}]}),
    );

    let page = api
        .list_my_medical_orders(&MedicalOrderListQuery::new())
        .expect("orders listed");
    assert_eq!(page.records.len(), 1);
}

#[test]
fn cancel_order_puts_to_cancel_path() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Put,
        "/medical-orders/o1/cancel",
        json!({"isSuccess": true, "data": {"_id": "o1", "childId": "c1", "status": "cancelled"}}),
    );

    let order = api.cancel_medical_order(&id("o1")).expect("order cancelled");

    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(stub.last_request().body, None);
}

#[test]
fn campaign_list_with_unknown_envelope_is_an_error() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/vaccination-campaigns",
        json!({"campaignList": []}),
    );

    let err = api
        .list_campaigns(&CampaignListQuery::new())
        .expect_err("unrecognized envelope");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn campaign_delete_uses_delete_verb() {
    let (api, stub) = stub_client();
    stub.json(Method::Delete, "/vaccination-campaigns/v1", json!({"isSuccess": true}));

    api.delete_campaign(&id("v1")).expect("campaign deleted");

    assert_eq!(stub.last_request().method, Method::Delete);
}

#[test]
fn missing_health_profile_is_not_found() {
    let (api, stub) = stub_client();
    stub.json(
        Method::Get,
        "/health-profiles/child/c1",
        json!({"isSuccess": true, "data": null}),
    );

    let err = api
        .get_health_profile(&id("c1"))
        .expect_err("no profile yet");
    assert!(err.is_not_found());
}
