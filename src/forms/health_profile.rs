use serde::Deserialize;
use validator::Validate;

use crate::domain::health_profile::{HealthProfile, HealthProfileUpdate, NewEmergencyContact};
use crate::domain::types::{Measurement, NoteText, PersonName, PhoneNumber};
use crate::forms::{FormError, non_blank, split_list, validate_blood_type};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for the health profile editor of a child.
pub struct HealthProfileForm {
    /// Centimetres.
    #[validate(range(min = 30.0, max = 250.0))]
    pub height: Option<f64>,
    /// Kilograms.
    #[validate(range(min = 2.0, max = 200.0))]
    pub weight: Option<f64>,
    #[validate(custom(function = "validate_blood_type"))]
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub chronic_diseases: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub vision: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub hearing: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub medical_history: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub emergency_contact_name: String,
    #[serde(default)]
    pub emergency_contact_relationship: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
}

impl HealthProfileForm {
    /// Pre-fills the editor from the stored profile.
    pub fn from_profile(profile: &HealthProfile) -> Self {
        let contact = profile.emergency_contact.as_ref();
        Self {
            height: profile.height,
            weight: profile.weight,
            blood_type: profile.blood_type.clone().unwrap_or_default(),
            allergies: profile.allergies.join(", "),
            chronic_diseases: profile.chronic_diseases.join(", "),
            vision: profile.vision.clone().unwrap_or_default(),
            hearing: profile.hearing.clone().unwrap_or_default(),
            medical_history: profile.medical_history.clone().unwrap_or_default(),
            emergency_contact_name: contact
                .and_then(|c| c.name.clone())
                .unwrap_or_default(),
            emergency_contact_relationship: contact
                .and_then(|c| c.relationship.clone())
                .unwrap_or_default(),
            emergency_contact_phone: contact
                .and_then(|c| c.phone.clone())
                .unwrap_or_default(),
        }
    }

    /// Validates the form and converts it into the profile payload.
    ///
    /// The emergency contact is optional, but once a name or phone is typed
    /// both become mandatory.
    pub fn to_update(&self) -> Result<HealthProfileUpdate, FormError> {
        self.validate()?;

        let contact_name = non_blank(&self.emergency_contact_name);
        let contact_phone = non_blank(&self.emergency_contact_phone);
        let emergency_contact = match (contact_name, contact_phone) {
            (None, None) => None,
            (Some(name), Some(phone)) => Some(NewEmergencyContact {
                name: PersonName::new(name)?,
                relationship: non_blank(&self.emergency_contact_relationship),
                phone: PhoneNumber::new(phone)?,
            }),
            (None, Some(_)) => return Err(FormError::MissingField("emergency_contact_name")),
            (Some(_), None) => return Err(FormError::MissingField("emergency_contact_phone")),
        };

        Ok(HealthProfileUpdate {
            height: self.height.map(Measurement::new).transpose()?,
            weight: self.weight.map(Measurement::new).transpose()?,
            blood_type: non_blank(&self.blood_type).map(|b| b.to_uppercase()),
            allergies: split_list(&self.allergies),
            chronic_diseases: split_list(&self.chronic_diseases),
            vision: non_blank(&self.vision),
            hearing: non_blank(&self.hearing),
            medical_history: non_blank(&self.medical_history)
                .map(NoteText::new)
                .transpose()?,
            emergency_contact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    #[test]
    fn phone_is_normalized() {
        let form = HealthProfileForm {
            emergency_contact_name: "Trần Thị Mai".to_string(),
            emergency_contact_relationship: "Mẹ".to_string(),
            emergency_contact_phone: "+84 912 345 678".to_string(),
            ..HealthProfileForm::default()
        };
        let update = form.to_update().unwrap();
        let contact = update.emergency_contact.unwrap();
        assert_eq!(contact.phone.as_str(), "+84912345678");
        assert_eq!(contact.relationship.as_deref(), Some("Mẹ"));
    }

    #[test]
    fn half_filled_contact_is_rejected() {
        let form = HealthProfileForm {
            emergency_contact_phone: "+84 912 345 678".to_string(),
            ..HealthProfileForm::default()
        };
        assert!(matches!(
            form.to_update(),
            Err(FormError::MissingField("emergency_contact_name"))
        ));
    }

    #[test]
    fn invalid_phone_surfaces_type_constraint() {
        let form = HealthProfileForm {
            emergency_contact_name: "Bố".to_string(),
            emergency_contact_phone: "abc".to_string(),
            ..HealthProfileForm::default()
        };
        assert!(matches!(
            form.to_update(),
            Err(FormError::TypeConstraint(TypeConstraintError::InvalidPhone))
        ));
    }

    #[test]
    fn out_of_range_metrics_fail_validation() {
        let form = HealthProfileForm {
            weight: Some(0.5),
            ..HealthProfileForm::default()
        };
        assert!(matches!(form.to_update(), Err(FormError::Validation(_))));
    }

    #[test]
    fn padded_blood_type_is_accepted() {
        let form = HealthProfileForm {
            blood_type: " ab- ".to_string(),
            ..HealthProfileForm::default()
        };
        let update = form.to_update().unwrap();
        assert_eq!(update.blood_type.as_deref(), Some("AB-"));
    }

    #[test]
    fn prefill_joins_lists() {
        let profile: HealthProfile = serde_json::from_value(serde_json::json!({
            "allergies": ["Tôm", "Phấn hoa"],
            "bloodType": "A+"
        }))
        .unwrap();
        let form = HealthProfileForm::from_profile(&profile);
        assert_eq!(form.allergies, "Tôm, Phấn hoa");
        assert_eq!(form.to_update().unwrap().allergies, vec!["Tôm", "Phấn hoa"]);
    }
}
