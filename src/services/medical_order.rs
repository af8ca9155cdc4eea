use crate::api::{MedicalOrderListQuery, MedicalOrderReader, MedicalOrderWriter};
use crate::domain::medical_order::{MedicalOrder, OrderStatus, OrderStatusUpdate};
use crate::domain::types::NoteText;
use crate::dto::medical_order::{OrdersPageData, OrdersPageQuery};
use crate::forms::medical_order::CreateMedicalOrderForm;
use crate::forms::non_blank;
use crate::forms::wizard::Wizard;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult, normalize_filter, parse_id};

/// Loads one page of medical orders with the status and child filters applied.
pub fn load_orders_page<R>(api: &R, query: OrdersPageQuery) -> ServiceResult<OrdersPageData>
where
    R: MedicalOrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query = MedicalOrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let status_filter = normalize_filter(query.status);
    if let Some(status) = &status_filter {
        list_query = list_query.status(status.clone());
    }

    let child_filter = normalize_filter(query.child_id);
    if let Some(child_id) = &child_filter {
        list_query = list_query.child(&parse_id(child_id)?);
    }

    let orders = if query.mine {
        api.list_my_medical_orders(&list_query)
    } else {
        api.list_medical_orders(&list_query)
    }
    .map_err(|err| {
        log::error!("Failed to list medical orders: {err}");
        ServiceError::from(err)
    })?;

    Ok(OrdersPageData {
        orders,
        status_filter,
        child_filter,
    })
}

/// Fetches one order; `Ok(None)` when the backend does not know it.
pub fn load_order_detail<R>(api: &R, order_id: &str) -> ServiceResult<Option<MedicalOrder>>
where
    R: MedicalOrderReader + ?Sized,
{
    let id = parse_id(order_id)?;
    match api.get_medical_order(&id) {
        Ok(order) => Ok(Some(order)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => {
            log::error!("Failed to load medical order {id}: {err}");
            Err(err.into())
        }
    }
}

/// Submits the medical-order wizard; the wizard is reset only on success.
pub fn create_order<R>(
    api: &R,
    wizard: &mut Wizard<CreateMedicalOrderForm>,
) -> ServiceResult<MedicalOrder>
where
    R: MedicalOrderWriter + ?Sized,
{
    wizard.submit(|order| {
        api.create_medical_order(&order).map_err(|err| {
            log::error!("Failed to create a medical order: {err}");
            ServiceError::from(err)
        })
    })
}

/// Moves an order to a new status on behalf of the school nurse.
pub fn update_order_status<R>(
    api: &R,
    order_id: &str,
    status: OrderStatus,
    note: &str,
) -> ServiceResult<MedicalOrder>
where
    R: MedicalOrderWriter + ?Sized,
{
    let id = parse_id(order_id)?;
    let update = OrderStatusUpdate {
        status,
        note: non_blank(note).map(NoteText::new).transpose()?,
    };

    api.update_medical_order_status(&id, &update)
        .map_err(|err| {
            log::error!("Failed to update status of medical order {id}: {err}");
            ServiceError::from(err)
        })
}

/// Cancels an order the parent submitted earlier.
///
/// Only pending orders may be cancelled; anything else is refused without
/// contacting the write endpoint.
pub fn cancel_order<R>(api: &R, order_id: &str) -> ServiceResult<MedicalOrder>
where
    R: MedicalOrderReader + MedicalOrderWriter + ?Sized,
{
    let order = load_order_detail(api, order_id)?.ok_or(ServiceError::NotFound)?;
    if order.status != OrderStatus::Pending {
        log::error!(
            "Refusing to cancel medical order {} in status {}",
            order.id,
            order.status
        );
        return Err(ServiceError::Conflict(
            "Chỉ có thể hủy đơn thuốc đang chờ duyệt".to_string(),
        ));
    }

    api.cancel_medical_order(&order.id).map_err(|err| {
        log::error!("Failed to cancel medical order {}: {err}", order.id);
        ServiceError::from(err)
    })
}
