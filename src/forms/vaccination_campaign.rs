use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CampaignTitle, NoteText, VaccineName};
use crate::domain::vaccination_campaign::{NewCampaign, VaccinationCampaign};
use crate::forms::{FormError, non_blank, split_list};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for creating or editing a vaccination campaign.
pub struct CampaignForm {
    /// Campaign title shown to parents.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Vaccine administered during the campaign.
    #[validate(length(min = 1, max = 100))]
    pub vaccine_name: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    /// Comma separated grades, e.g. `1, 2, 3`.
    #[serde(default)]
    pub target_grades: String,
    #[validate(required)]
    pub scheduled_date: Option<NaiveDate>,
}

impl CampaignForm {
    /// Pre-fills the edit modal from an existing campaign.
    pub fn from_campaign(campaign: &VaccinationCampaign) -> Self {
        Self {
            title: campaign.title.to_string(),
            vaccine_name: campaign.vaccine_name.clone().unwrap_or_default(),
            description: campaign.description.clone().unwrap_or_default(),
            target_grades: campaign.target_grades.join(", "),
            scheduled_date: campaign.scheduled_date,
        }
    }

    /// Validates the form and converts it into the campaign payload.
    pub fn to_new_campaign(&self) -> Result<NewCampaign, FormError> {
        self.validate()?;
        Ok(NewCampaign {
            title: CampaignTitle::new(self.title.as_str())?,
            vaccine_name: VaccineName::new(self.vaccine_name.as_str())?,
            description: non_blank(&self.description)
                .map(NoteText::new)
                .transpose()?,
            target_grades: split_list(&self.target_grades),
            scheduled_date: self
                .scheduled_date
                .ok_or(FormError::MissingField("scheduled_date"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_date_fails_validation() {
        let form = CampaignForm {
            title: "Tiêm sởi".to_string(),
            vaccine_name: "MMR".to_string(),
            ..CampaignForm::default()
        };
        assert!(matches!(
            form.to_new_campaign(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn builds_campaign_payload() {
        let form = CampaignForm {
            title: " Tiêm sởi đợt 1 ".to_string(),
            vaccine_name: "MMR".to_string(),
            description: "<script>x</script>Mang sổ tiêm chủng".to_string(),
            target_grades: "1, 2,1".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 11, 20),
        };
        let campaign = form.to_new_campaign().unwrap();
        assert_eq!(campaign.title.as_str(), "Tiêm sởi đợt 1");
        assert_eq!(campaign.target_grades, vec!["1", "2"]);
        assert_eq!(
            campaign.description.as_ref().map(NoteText::as_str),
            Some("Mang sổ tiêm chủng")
        );
    }

    #[test]
    fn edit_form_round_trips_existing_campaign() {
        let campaign: VaccinationCampaign = serde_json::from_value(json!({
            "_id": "v1",
            "title": "Tiêm cúm",
            "vaccineName": "Influvac",
            "targetGrades": ["3", "4"],
            "scheduledDate": "2024-12-01",
            "status": "draft"
        }))
        .unwrap();
        let form = CampaignForm::from_campaign(&campaign);
        assert_eq!(form.target_grades, "3, 4");
        let payload = form.to_new_campaign().unwrap();
        assert_eq!(payload.vaccine_name.as_str(), "Influvac");
        assert_eq!(payload.scheduled_date, campaign.scheduled_date.unwrap());
    }
}
