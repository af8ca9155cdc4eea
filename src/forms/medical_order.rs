//! Wizard used by parents to hand a prescription over to the school nurse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::medical_order::{NewMedicalOrder, NewMedicationItem};
use crate::domain::types::{DateRange, MedicationName, NoteText, RecordId};
use crate::forms::wizard::WizardForm;
use crate::forms::{FormError, non_blank};

fn end_not_before_start(step: &OrderScheduleStep) -> Result<(), ValidationError> {
    match (step.start_date, step.end_date) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("end_before_start")),
        _ => Ok(()),
    }
}

/// Step 1: which child and for how long.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "end_not_before_start"))]
pub struct OrderScheduleStep {
    #[validate(length(min = 1))]
    pub child_id: String,
    #[validate(required)]
    pub start_date: Option<NaiveDate>,
    #[validate(required)]
    pub end_date: Option<NaiveDate>,
}

/// One medication line of step 2.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MedicationEntry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub dosage: String,
    #[validate(length(min = 1, max = 100))]
    pub frequency: String,
    #[validate(range(min = 1))]
    pub quantity: Option<u32>,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub note: String,
}

impl MedicationEntry {
    fn to_item(&self) -> Result<NewMedicationItem, FormError> {
        Ok(NewMedicationItem {
            name: MedicationName::new(self.name.as_str())?,
            dosage: self.dosage.trim().to_string(),
            frequency: self.frequency.trim().to_string(),
            quantity: self.quantity,
            note: non_blank(&self.note).map(NoteText::new).transpose()?,
        })
    }
}

/// Step 2: the medications to administer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderMedicationsStep {
    #[validate(length(min = 1), nested)]
    pub medications: Vec<MedicationEntry>,
}

impl Default for OrderMedicationsStep {
    /// The form opens with one empty line ready to fill in.
    fn default() -> Self {
        Self {
            medications: vec![MedicationEntry::default()],
        }
    }
}

/// Step 3: review plus an optional note for the nurse.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderConfirmationStep {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMedicalOrderForm {
    pub schedule: OrderScheduleStep,
    pub medications: OrderMedicationsStep,
    pub confirmation: OrderConfirmationStep,
}

impl CreateMedicalOrderForm {
    /// Form pre-selecting the child whose page the wizard was opened from.
    pub fn for_child(child_id: &RecordId) -> Self {
        let mut form = Self::default();
        form.schedule.child_id = child_id.to_string();
        form
    }

    /// Appends an empty medication line.
    pub fn add_medication(&mut self) -> usize {
        self.medications.medications.push(MedicationEntry::default());
        self.medications.medications.len()
    }

    /// Removes the medication line at `index`.
    pub fn remove_medication(&mut self, index: usize) -> Result<MedicationEntry, FormError> {
        if index >= self.medications.medications.len() {
            return Err(FormError::InvalidMedicationIndex(index));
        }
        Ok(self.medications.medications.remove(index))
    }
}

impl WizardForm for CreateMedicalOrderForm {
    type Payload = NewMedicalOrder;

    const STEPS: usize = 3;

    fn validate_step(&self, step: usize) -> Result<(), ValidationErrors> {
        match step {
            0 => self.schedule.validate(),
            1 => self.medications.validate(),
            _ => self.confirmation.validate(),
        }
    }

    fn to_payload(&self) -> Result<NewMedicalOrder, FormError> {
        let schedule = &self.schedule;
        let range = DateRange::new(
            schedule
                .start_date
                .ok_or(FormError::MissingField("start_date"))?,
            schedule.end_date.ok_or(FormError::MissingField("end_date"))?,
        )?;

        let medications = self
            .medications
            .medications
            .iter()
            .map(MedicationEntry::to_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewMedicalOrder {
            child_id: RecordId::new(schedule.child_id.as_str())?,
            medications,
            start_date: range.start(),
            end_date: range.end(),
            note: non_blank(&self.confirmation.note)
                .map(NoteText::new)
                .transpose()?,
        })
    }
}
