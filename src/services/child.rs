use chrono::NaiveDate;

use crate::api::child::find_child_by_id;
use crate::api::{ChildListQuery, ChildReader, ChildWriter, HealthProfileReader};
use crate::domain::child::Child;
use crate::domain::health_profile::HealthProfile;
use crate::dto::child::{ChildOperationOutcome, ChildPageData};
use crate::forms::child::{AddChildForm, UpdateChildForm};
use crate::forms::wizard::Wizard;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{ServiceError, ServiceResult, normalize_filter, parse_id};

/// Lists the children of the signed-in parent, optionally filtered by name.
pub fn list_children<R>(
    api: &R,
    search: Option<String>,
    page: Option<u64>,
) -> ServiceResult<Paginated<Child>>
where
    R: ChildReader + ?Sized,
{
    let mut query = ChildListQuery::new().paginate(page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = normalize_filter(search) {
        query = query.search(term);
    }

    api.list_children(&query).map_err(|err| {
        log::error!("Failed to list children: {err}");
        ServiceError::from(err)
    })
}

/// Loads the child detail page.
///
/// Returns `Ok(None)` when neither lookup stage finds the child. A missing
/// health profile leaves `profile` empty.
pub fn load_child_page<R>(
    api: &R,
    child_id: &str,
    today: NaiveDate,
) -> ServiceResult<Option<ChildPageData>>
where
    R: ChildReader + HealthProfileReader + ?Sized,
{
    let id = parse_id(child_id)?;

    let lookup = match find_child_by_id(api, &id) {
        Ok(lookup) => lookup,
        Err(err) if err.is_not_found() => return Ok(None),
        Err(err) => {
            log::error!("Failed to load child {id}: {err}");
            return Err(err.into());
        }
    };

    let profile = load_profile(api, &lookup.child)?;
    let bmi = profile.as_ref().and_then(HealthProfile::bmi);

    Ok(Some(ChildPageData {
        age: lookup.child.age_on(today),
        child: lookup.child,
        source: lookup.source,
        profile,
        bmi,
    }))
}

fn load_profile<R>(api: &R, child: &Child) -> ServiceResult<Option<HealthProfile>>
where
    R: HealthProfileReader + ?Sized,
{
    match api.get_health_profile(&child.id) {
        Ok(profile) => Ok(Some(profile)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => {
            log::error!("Failed to load health profile of child {}: {err}", child.id);
            Err(err.into())
        }
    }
}

/// Submits the add-child wizard; the wizard is reset only when the backend
/// accepts the child.
pub fn add_child<R>(api: &R, wizard: &mut Wizard<AddChildForm>) -> ServiceResult<ChildOperationOutcome>
where
    R: ChildWriter + ?Sized,
{
    let child = wizard.submit(|new_child| {
        api.add_child(&new_child).map_err(|err| {
            log::error!("Failed to add a child: {err}");
            ServiceError::from(err)
        })
    })?;

    Ok(ChildOperationOutcome { child })
}

/// Applies the edit form to the child. An edit that changes nothing is not
/// sent; the current record is returned instead.
pub fn update_child<R>(
    api: &R,
    child_id: &str,
    form: &UpdateChildForm,
) -> ServiceResult<ChildOperationOutcome>
where
    R: ChildReader + ChildWriter + ?Sized,
{
    let id = parse_id(child_id)?;
    let updates = form.to_update().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    let child = if updates.is_empty() {
        find_child_by_id(api, &id)?.child
    } else {
        api.update_child(&id, &updates).map_err(|err| {
            log::error!("Failed to update child {id}: {err}");
            ServiceError::from(err)
        })?
    };

    Ok(ChildOperationOutcome { child })
}

pub fn delete_child<R>(api: &R, child_id: &str) -> ServiceResult<()>
where
    R: ChildWriter + ?Sized,
{
    let id = parse_id(child_id)?;
    api.delete_child(&id).map_err(|err| {
        log::error!("Failed to delete child {id}: {err}");
        ServiceError::from(err)
    })
}
