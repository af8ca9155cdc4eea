use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CampaignTitle, NoteText, RecordId, VaccineName, lenient};

/// School-wide vaccination campaign managed from the admin console.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationCampaign {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(alias = "name")]
    pub title: CampaignTitle,
    #[serde(default, alias = "vaccine")]
    pub vaccine_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub target_grades: Vec<String>,
    #[serde(
        default,
        alias = "date",
        alias = "startDate",
        deserialize_with = "lenient::optional_date"
    )]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "Option<String>", into = "String")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Announced,
    Ongoing,
    Completed,
    Cancelled,
    Other(String),
}

impl CampaignStatus {
    /// Whether an administrator may still edit the campaign details.
    pub fn is_editable(&self) -> bool {
        matches!(self, CampaignStatus::Draft | CampaignStatus::Announced)
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Announced => write!(f, "announced"),
            CampaignStatus::Ongoing => write!(f, "ongoing"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Cancelled => write!(f, "cancelled"),
            CampaignStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CampaignStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "draft" => CampaignStatus::Draft,
            "announced" | "planned" => CampaignStatus::Announced,
            "ongoing" | "in_progress" => CampaignStatus::Ongoing,
            "completed" => CampaignStatus::Completed,
            "cancelled" | "canceled" => CampaignStatus::Cancelled,
            _ => CampaignStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// `null` reads as the default status.
impl From<Option<String>> for CampaignStatus {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        status.to_string()
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub title: CampaignTitle,
    pub vaccine_name: VaccineName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<NoteText>,
    pub target_grades: Vec<String>,
    pub scheduled_date: NaiveDate,
}

/// Full replacement of the editable campaign fields.
pub type UpdateCampaign = NewCampaign;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CampaignStatusUpdate {
    pub status: CampaignStatus,
}
