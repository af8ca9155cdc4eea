//! Add-child wizard and the edit form of the child detail page.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::child::{Gender, NewChild, UpdateChild};
use crate::domain::types::{Measurement, PersonName};
use crate::forms::wizard::WizardForm;
use crate::forms::{FormError, non_blank, split_list, validate_blood_type};

fn birth_date_in_past(step: &ChildDemographicsStep) -> Result<(), ValidationError> {
    match step.date_of_birth {
        Some(dob) if dob > Utc::now().date_naive() => {
            Err(ValidationError::new("date_of_birth_in_future"))
        }
        _ => Ok(()),
    }
}

/// Step 1: who the child is.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "birth_date_in_past"))]
pub struct ChildDemographicsStep {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(required)]
    pub date_of_birth: Option<NaiveDate>,
    #[validate(required)]
    pub gender: Option<Gender>,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[serde(default)]
    pub school_name: String,
}

/// Step 2: optional health metrics.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChildHealthStep {
    /// Centimetres.
    #[validate(range(min = 30.0, max = 250.0))]
    pub height: Option<f64>,
    /// Kilograms.
    #[validate(range(min = 2.0, max = 200.0))]
    pub weight: Option<f64>,
    #[validate(custom(function = "validate_blood_type"))]
    #[serde(default)]
    pub blood_type: String,
    /// Comma or newline separated.
    #[serde(default)]
    pub allergies: String,
    /// Comma or newline separated.
    #[serde(default)]
    pub chronic_diseases: String,
}

/// Demographics, then health metrics, then a read-only confirmation step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddChildForm {
    pub demographics: ChildDemographicsStep,
    pub health: ChildHealthStep,
}

impl WizardForm for AddChildForm {
    type Payload = NewChild;

    const STEPS: usize = 3;

    fn validate_step(&self, step: usize) -> Result<(), ValidationErrors> {
        match step {
            0 => self.demographics.validate(),
            1 => self.health.validate(),
            _ => Ok(()),
        }
    }

    fn to_payload(&self) -> Result<NewChild, FormError> {
        let demographics = &self.demographics;
        let health = &self.health;

        Ok(NewChild {
            full_name: PersonName::new(demographics.full_name.as_str())?,
            date_of_birth: demographics
                .date_of_birth
                .ok_or(FormError::MissingField("date_of_birth"))?,
            gender: demographics
                .gender
                .ok_or(FormError::MissingField("gender"))?,
            class_name: demographics.class_name.trim().to_string(),
            school_name: non_blank(&demographics.school_name),
            height: health.height.map(Measurement::new).transpose()?,
            weight: health.weight.map(Measurement::new).transpose()?,
            blood_type: non_blank(&health.blood_type).map(|b| b.to_uppercase()),
            allergies: split_list(&health.allergies),
            chronic_diseases: split_list(&health.chronic_diseases),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for editing a child from the detail page; blank fields are left
/// unchanged.
pub struct UpdateChildForm {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub school_name: String,
}

impl UpdateChildForm {
    pub fn to_update(&self) -> Result<UpdateChild, FormError> {
        self.validate()?;
        Ok(UpdateChild {
            full_name: non_blank(&self.full_name)
                .map(PersonName::new)
                .transpose()?,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            class_name: non_blank(&self.class_name),
            school_name: non_blank(&self.school_name),
        })
    }
}
