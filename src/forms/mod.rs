//! Form definitions and multi-step wizards feeding the API layer.

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod child;
pub mod health_profile;
pub mod medical_order;
pub mod vaccination_campaign;
pub mod wizard;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("form can only be submitted from its last step")]
    NotOnLastStep,

    #[error("no medication at position {0}")]
    InvalidMedicationIndex(usize),
}

/// Splits a comma or newline separated text area into trimmed, de-duplicated
/// entries, keeping their first-seen order.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split([',', '\n']).map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|seen| seen.eq_ignore_ascii_case(item)) {
            items.push(item.to_string());
        }
    }
    items
}

/// Trimmed text or `None` when blank.
pub(crate) fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blood group such as `O+` or `AB-`, checked after trimming since the
/// payload is trimmed too.
pub(crate) fn validate_blood_type(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().chars().count() > 3 {
        return Err(ValidationError::new("blood_type_too_long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_deduplicates() {
        assert_eq!(
            split_list(" Peanut, dust\n\npeanut ,Pollen "),
            vec!["Peanut", "dust", "Pollen"]
        );
        assert!(split_list(" , \n").is_empty());
    }

    #[test]
    fn non_blank_discards_whitespace() {
        assert_eq!(non_blank("  3A "), Some("3A".to_string()));
        assert_eq!(non_blank("   "), None);
    }

    #[test]
    fn blood_type_is_measured_without_padding() {
        assert!(validate_blood_type(" o+ ").is_ok());
        assert!(validate_blood_type("").is_ok());
        assert!(validate_blood_type("AB+ ").is_ok());
        assert!(validate_blood_type("ABO+").is_err());
    }
}
