//! Step-gated form state machine shared by the multi-step modals.
//!
//! A wizard sits on one step of `0..STEPS`. [`Wizard::advance`] validates only
//! the fields of the current step and refuses to move on error;
//! [`Wizard::retreat`] always moves back. From the last step
//! [`Wizard::submit`] validates everything, hands the aggregate payload to the
//! caller and resets the wizard once the caller reports success.

use validator::ValidationErrors;

use crate::forms::FormError;

/// Form split into validated steps.
pub trait WizardForm: Default {
    /// Value handed to the API layer on submit.
    type Payload;

    /// Number of steps, the confirmation step included.
    const STEPS: usize;

    /// Validates the fields belonging to `step`.
    fn validate_step(&self, step: usize) -> Result<(), ValidationErrors>;

    /// Builds the payload from a fully validated form.
    fn to_payload(&self) -> Result<Self::Payload, FormError>;
}

#[derive(Debug, Clone)]
pub struct Wizard<F> {
    form: F,
    step: usize,
}

impl<F: WizardForm> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WizardForm> Wizard<F> {
    pub fn new() -> Self {
        Self::with_form(F::default())
    }

    /// Starts on the first step with pre-filled fields.
    pub fn with_form(form: F) -> Self {
        Self { form, step: 0 }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_count(&self) -> usize {
        F::STEPS
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= F::STEPS
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Validates the current step and moves to the next one.
    ///
    /// On the last step this only validates; the step index does not move.
    pub fn advance(&mut self) -> Result<usize, FormError> {
        self.form.validate_step(self.step)?;
        if !self.is_last_step() {
            self.step += 1;
        }
        Ok(self.step)
    }

    /// Moves one step back without validating.
    pub fn retreat(&mut self) -> usize {
        self.step = self.step.saturating_sub(1);
        self.step
    }

    /// Validates every step and builds the payload without submitting it.
    pub fn payload(&self) -> Result<F::Payload, FormError> {
        if !self.is_last_step() {
            return Err(FormError::NotOnLastStep);
        }
        for step in 0..F::STEPS {
            self.form.validate_step(step)?;
        }
        self.form.to_payload()
    }

    /// Sends the payload through `send` and resets the wizard on success.
    ///
    /// On failure the wizard keeps its step and fields so the user can retry.
    pub fn submit<T, E>(&mut self, send: impl FnOnce(F::Payload) -> Result<T, E>) -> Result<T, E>
    where
        E: From<FormError>,
    {
        let payload = self.payload()?;
        let outcome = send(payload)?;
        self.reset();
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.form = F::default();
        self.step = 0;
    }

    /// Closing the modal discards everything entered so far.
    pub fn close(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[derive(Debug, Default, Validate)]
    struct NameStep {
        #[validate(length(min = 1))]
        name: String,
    }

    #[derive(Debug, Default)]
    struct TwoStepForm {
        first: NameStep,
        second: NameStep,
    }

    impl WizardForm for TwoStepForm {
        type Payload = (String, String);
        const STEPS: usize = 2;

        fn validate_step(&self, step: usize) -> Result<(), ValidationErrors> {
            match step {
                0 => self.first.validate(),
                1 => self.second.validate(),
                _ => {
                    let mut errors = ValidationErrors::new();
                    errors.add("step", ValidationError::new("out_of_range"));
                    Err(errors)
                }
            }
        }

        fn to_payload(&self) -> Result<Self::Payload, FormError> {
            Ok((self.first.name.clone(), self.second.name.clone()))
        }
    }

    #[test]
    fn advance_is_blocked_by_current_step_only() {
        let mut wizard = Wizard::<TwoStepForm>::new();
        assert!(matches!(wizard.advance(), Err(FormError::Validation(_))));
        assert_eq!(wizard.step(), 0);

        wizard.form_mut().first.name = "a".into();
        assert_eq!(wizard.advance().unwrap(), 1);
        assert!(wizard.is_last_step());
    }

    #[test]
    fn retreat_is_unconditional_and_saturates() {
        let mut wizard = Wizard::<TwoStepForm>::new();
        assert_eq!(wizard.retreat(), 0);
        wizard.form_mut().first.name = "a".into();
        wizard.advance().unwrap();
        assert_eq!(wizard.retreat(), 0);
    }

    #[test]
    fn submit_requires_last_step() {
        let mut wizard = Wizard::<TwoStepForm>::new();
        let result: Result<(), FormError> = wizard.submit(|_| Ok(()));
        assert!(matches!(result, Err(FormError::NotOnLastStep)));
    }

    #[test]
    fn submit_resets_only_on_success() {
        let mut wizard = Wizard::<TwoStepForm>::new();
        wizard.form_mut().first.name = "a".into();
        wizard.advance().unwrap();
        wizard.form_mut().second.name = "b".into();

        let failed: Result<(), FormError> = wizard.submit(|_| Err(FormError::NotOnLastStep));
        assert!(failed.is_err());
        assert_eq!(wizard.step(), 1);
        assert_eq!(wizard.form().second.name, "b");

        let sent: Result<(String, String), FormError> = wizard.submit(Ok);
        assert_eq!(sent.unwrap(), ("a".to_string(), "b".to_string()));
        assert_eq!(wizard.step(), 0);
        assert!(wizard.form().first.name.is_empty());
    }

    #[test]
    fn close_discards_input() {
        let mut wizard = Wizard::<TwoStepForm>::new();
        wizard.form_mut().first.name = "a".into();
        wizard.advance().unwrap();
        wizard.close();
        assert_eq!(wizard.step(), 0);
        assert!(wizard.form().first.name.is_empty());
    }
}
