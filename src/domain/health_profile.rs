//! Health profile kept per child and edited by the parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::medical_order::ChildRef;
use crate::domain::types::{Measurement, NoteText, PersonName, PhoneNumber, lenient};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    #[serde(default, alias = "childId", alias = "student")]
    pub child: Option<ChildRef>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub chronic_diseases: Vec<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub hearing: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HealthProfile {
    /// Body mass index when both height (cm) and weight (kg) are present.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(h), Some(w)) if h > 0.0 && w > 0.0 => {
                let metres = h / 100.0;
                Some(w / (metres * metres))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload written by the health profile form.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub chronic_diseases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<NoteText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<NewEmergencyContact>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmergencyContact {
    pub name: PersonName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    pub phone: PhoneNumber,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bmi_requires_both_measurements() {
        let mut profile: HealthProfile = serde_json::from_value(json!({
            "childId": "c1",
            "height": 125,
            "weight": "25"
        }))
        .unwrap();
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 16.0).abs() < 1e-9);

        profile.weight = None;
        assert_eq!(profile.bmi(), None);
    }
}
