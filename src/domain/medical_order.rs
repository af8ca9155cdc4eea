use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{MedicationName, NoteText, RecordId, lenient};

/// Prescription a parent hands over to the school nurse.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalOrder {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(alias = "childId", alias = "student")]
    pub child: ChildRef,
    #[serde(default, alias = "medicines", alias = "items")]
    pub medications: Vec<MedicationItem>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MedicalOrder {
    pub fn child_id(&self) -> &RecordId {
        self.child.id()
    }

    /// Whether the order covers the given day.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        let started = self.start_date.is_none_or(|start| start <= day);
        let not_ended = self.end_date.is_none_or(|end| day <= end);
        started && not_ended && matches!(self.status, OrderStatus::Approved)
    }
}

/// Child reference as delivered by the backend: either a bare id or a
/// populated sub-document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChildRef {
    Embedded(ChildSummary),
    Id(RecordId),
}

impl ChildRef {
    pub fn id(&self) -> &RecordId {
        match self {
            ChildRef::Embedded(summary) => &summary.id,
            ChildRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ChildRef::Embedded(summary) => summary.full_name.as_deref(),
            ChildRef::Id(_) => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationItem {
    #[serde(alias = "medicineName")]
    pub name: MedicationName,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "Option<String>", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
    Other(String),
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Approved => write!(f, "approved"),
            OrderStatus::Rejected => write!(f, "rejected"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "approved" => OrderStatus::Approved,
            "rejected" => OrderStatus::Rejected,
            "completed" => OrderStatus::Completed,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// `null` reads as the default status.
impl From<Option<String>> for OrderStatus {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.to_string()
    }
}

/// Payload submitted by the medical-order wizard.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalOrder {
    pub child_id: RecordId,
    pub medications: Vec<NewMedicationItem>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicationItem {
    pub name: MedicationName,
    pub dosage: String,
    pub frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
}

/// Status transition requested for an order.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteText>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_reference_accepts_id_or_document() {
        let by_id: MedicalOrder = serde_json::from_value(json!({
            "_id": "o1",
            "childId": "c1",
            "status": "approved"
        }))
        .unwrap();
        assert_eq!(by_id.child_id().as_str(), "c1");
        assert_eq!(by_id.status, OrderStatus::Approved);

        let embedded: MedicalOrder = serde_json::from_value(json!({
            "_id": "o2",
            "child": {"_id": "c9", "fullName": "Phạm Thu"},
            "medicines": [{"medicineName": "Paracetamol", "dosage": "250mg", "frequency": "2 lần/ngày"}]
        }))
        .unwrap();
        assert_eq!(embedded.child_id().as_str(), "c9");
        assert_eq!(embedded.child.name(), Some("Phạm Thu"));
        assert_eq!(embedded.medications[0].name.as_str(), "Paracetamol");
        assert_eq!(embedded.status, OrderStatus::Pending);
    }

    #[test]
    fn null_status_reads_as_pending() {
        let order: MedicalOrder = serde_json::from_value(json!({
            "_id": "o4",
            "childId": "c1",
            "status": null
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn status_round_trips_unknown_values() {
        assert_eq!(OrderStatus::from("Canceled"), OrderStatus::Cancelled);
        let other = OrderStatus::from("on_hold");
        assert_eq!(other, OrderStatus::Other("on_hold".to_string()));
        assert_eq!(String::from(other), "on_hold");
    }

    #[test]
    fn active_only_inside_range_when_approved() {
        let order: MedicalOrder = serde_json::from_value(json!({
            "_id": "o3",
            "childId": "c1",
            "startDate": "2024-09-01",
            "endDate": "2024-09-03",
            "status": "approved"
        }))
        .unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 9, d).unwrap();
        assert!(order.is_active_on(day(1)));
        assert!(order.is_active_on(day(3)));
        assert!(!order.is_active_on(day(4)));
    }
}
