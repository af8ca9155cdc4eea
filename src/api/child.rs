use crate::api::errors::{ApiError, ApiResult};
use crate::api::{ApiClient, ChildListQuery, ChildReader, ChildWriter, decode_page, decode_record};
use crate::domain::child::{Child, ChildLookup, LookupSource, NewChild, UpdateChild};
use crate::domain::types::RecordId;
use crate::envelope::rejection;
use crate::pagination::Paginated;
use crate::transport::ApiRequest;

pub const CHILDREN_PATH: &str = "/childs/all";
pub const ADD_CHILD_PATH: &str = "/childs/add";

impl ChildReader for ApiClient {
    fn list_children(&self, query: &ChildListQuery) -> ApiResult<Paginated<Child>> {
        let request = ApiRequest::get(CHILDREN_PATH).with_query(query)?;
        let response = self.transport().send(&request)?;
        decode_page(
            &response,
            Some("children"),
            self.page_defaults(query.page, query.limit),
        )
    }

    fn get_child(&self, id: &RecordId) -> ApiResult<Child> {
        let response = self
            .transport()
            .send(&ApiRequest::get(format!("/child/{id}")))?;
        decode_record(&response)
    }
}

impl ChildWriter for ApiClient {
    fn add_child(&self, new_child: &NewChild) -> ApiResult<Child> {
        let request = ApiRequest::post(ADD_CHILD_PATH).with_json(new_child)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn update_child(&self, id: &RecordId, updates: &UpdateChild) -> ApiResult<Child> {
        let request = ApiRequest::put(format!("/child/update/{id}")).with_json(updates)?;
        let response = self.transport().send(&request)?;
        decode_record(&response)
    }

    fn delete_child(&self, id: &RecordId) -> ApiResult<()> {
        let response = self
            .transport()
            .send(&ApiRequest::delete(format!("/child/delete/{id}")))?;
        match rejection(&response) {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Ok(()),
        }
    }
}

/// Looks a child up through the detail endpoint, falling back to scanning the
/// full list when the detail call fails.
///
/// The error of the detail call is logged and dropped; an error of the list
/// call is returned as is. A child missing from the list yields
/// [`ApiError::NotFound`].
pub fn find_child_by_id<R>(api: &R, id: &RecordId) -> ApiResult<ChildLookup>
where
    R: ChildReader + ?Sized,
{
    match api.get_child(id) {
        Ok(child) => {
            return Ok(ChildLookup {
                child,
                source: LookupSource::Detail,
            });
        }
        Err(err) => {
            log::warn!("Child detail lookup for {id} failed, scanning the list: {err}");
        }
    }

    let children = api.list_children(&ChildListQuery::new())?;
    children
        .records
        .into_iter()
        .find(|child| &child.id == id)
        .map(|child| ChildLookup {
            child,
            source: LookupSource::ListScan,
        })
        .ok_or_else(|| ApiError::NotFound("Child not found".to_string()))
}
