use crate::api::errors::ApiResult;
use crate::api::{
    ApiClient, MedicalOrderListQuery, MedicalOrderReader, MedicalOrderWriter, decode_page,
    decode_record,
};
use crate::domain::medical_order::{MedicalOrder, NewMedicalOrder, OrderStatusUpdate};
use crate::domain::types::RecordId;
use crate::pagination::Paginated;
use crate::transport::ApiRequest;

pub const MEDICAL_ORDERS_PATH: &str = "/medical-orders";
pub const MY_MEDICAL_ORDERS_PATH: &str = "/medical-orders/my-orders";

impl ApiClient {
    fn fetch_orders(
        &self,
        path: &str,
        query: &MedicalOrderListQuery,
    ) -> ApiResult<Paginated<MedicalOrder>> {
        let request = ApiRequest::get(path).with_query(query)?;
        let response = self.transport().send(&request)?;
        decode_page(
            &response,
            Some("orders"),
            self.page_defaults(query.page, query.limit),
        )
    }
}

impl MedicalOrderReader for ApiClient {
    fn list_medical_orders(
        &self,
        query: &MedicalOrderListQuery,
    ) -> ApiResult<Paginated<MedicalOrder>> {
        self.fetch_orders(MEDICAL_ORDERS_PATH, query)
    }

    fn list_my_medical_orders(
        &self,
        query: &MedicalOrderListQuery,
    ) -> ApiResult<Paginated<MedicalOrder>> {
        self.fetch_orders(MY_MEDICAL_ORDERS_PATH, query)
    }

    fn get_medical_order(&self, id: &RecordId) -> ApiResult<MedicalOrder> {
        let response = self
            .transport()
            .send(&ApiRequest::get(format!("{MEDICAL_ORDERS_PATH}/{id}")))?;
        decode_record(&response)
    }
}

impl MedicalOrderWriter for ApiClient {
    fn create_medical_order(&self, order: &NewMedicalOrder) -> ApiResult<MedicalOrder> {
        let request = ApiRequest::post(MEDICAL_ORDERS_PATH).with_json(order)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn update_medical_order_status(
        &self,
        id: &RecordId,
        update: &OrderStatusUpdate,
    ) -> ApiResult<MedicalOrder> {
        let request =
            ApiRequest::put(format!("{MEDICAL_ORDERS_PATH}/{id}/status")).with_json(update)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn cancel_medical_order(&self, id: &RecordId) -> ApiResult<MedicalOrder> {
        let response = self
            .transport()
            .send(&ApiRequest::put(format!("{MEDICAL_ORDERS_PATH}/{id}/cancel")))?;
        decode_record(&response)
    }
}
