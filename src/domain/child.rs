use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Measurement, PersonName, RecordId, lenient};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Other,
}

/// A child registered by a parent account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(alias = "name")]
    pub full_name: PersonName,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, alias = "class")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    /// Height in centimetres.
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub height: Option<f64>,
    /// Weight in kilograms.
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub chronic_diseases: Vec<String>,
    #[serde(default, alias = "parent")]
    pub parent_id: Option<String>,
}

impl Child {
    /// Age in full years on the given day, if the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.and_then(|dob| today.years_since(dob))
    }
}

/// Payload submitted by the add-child wizard.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewChild {
    pub full_name: PersonName,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub chronic_diseases: Vec<String>,
}

/// Partial update of a child; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
}

impl UpdateChild {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Which stage of the two-stage lookup produced the child.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    /// The detail endpoint answered.
    Detail,
    /// The detail endpoint failed and the child was found by scanning the list.
    ListScan,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChildLookup {
    pub child: Child,
    pub source: LookupSource,
}
