use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::core::validation::{validate_field, validate_form};
use crate::core::{Field, FormData, FormErrors, TouchedFields};
use crate::error::SubmissionError;
use crate::runtime::event::FormEvent;
use crate::runtime::scheduler::{RESET_TIMER, SUBMISSION_TIMER, SchedulerCommand};

/// Lifecycle stage derived from the form's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pristine: nothing typed, nothing touched.
    Idle,
    Editing,
    Submitting,
    Submitted,
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; errors are now visible.
    Invalid,
    /// A submission is already in flight.
    Busy,
    /// Validation passed. The snapshot must be reported to the sink.
    Proceed(FormData),
}

#[derive(Debug, Clone)]
pub struct FormState {
    values: FormData,
    touched: TouchedFields,
    errors: FormErrors,
    is_submitting: bool,
    is_submitted: bool,
    form_error: Option<String>,
    submission_delay: Duration,
    reset_delay: Duration,
    pending_scheduler: Vec<SchedulerCommand>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}

impl FormState {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            values: FormData::default(),
            touched: TouchedFields::default(),
            errors: FormErrors::new(),
            is_submitting: false,
            is_submitted: false,
            form_error: None,
            submission_delay: config.submission_delay(),
            reset_delay: config.reset_delay(),
            pending_scheduler: Vec::new(),
        }
    }

    pub fn values(&self) -> &FormData {
        &self.values
    }

    pub fn touched(&self) -> &TouchedFields {
        &self.touched
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// The error for `field`, but only once the field has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.touched.get(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_submitting {
            Phase::Submitting
        } else if self.is_submitted {
            Phase::Submitted
        } else if self.values.is_empty() && !self.touched.any() && self.errors.is_empty() {
            Phase::Idle
        } else {
            Phase::Editing
        }
    }

    pub fn handle_change(&mut self, field: Field, value: String) {
        debug!(field = %field, "field changed");
        if self.touched.get(field) {
            let error = validate_field(field, &value);
            self.errors.set(field, error);
        }
        self.values.set(field, value);

        if self.is_submitted {
            debug!("edit after submission dismisses success banner");
            self.is_submitted = false;
        }
        self.form_error = None;
    }

    pub fn handle_blur(&mut self, field: Field) {
        self.touched.touch(field);
        let error = validate_field(field, self.values.get(field));
        debug!(field = %field, valid = error.is_none(), "field blurred");
        self.errors.set(field, error);
    }

    pub fn handle_submit(&mut self) -> SubmitOutcome {
        if self.is_submitting {
            debug!("submit ignored while a submission is in flight");
            return SubmitOutcome::Busy;
        }

        self.touched.touch_all();
        self.errors = validate_form(&self.values);

        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "submit blocked by validation");
            return SubmitOutcome::Invalid;
        }

        self.is_submitting = true;
        self.is_submitted = false;
        self.form_error = None;
        info!("form valid, submitting");

        // A reset left over from an earlier success must not clear this submission.
        self.pending_scheduler.push(SchedulerCommand::Cancel {
            key: RESET_TIMER.to_string(),
        });
        self.pending_scheduler.push(SchedulerCommand::EmitAfter {
            key: SUBMISSION_TIMER.to_string(),
            delay: self.submission_delay,
            event: FormEvent::SubmissionTimerFired,
        });

        SubmitOutcome::Proceed(self.values.clone())
    }

    /// Returns `false` when no submission was in flight.
    pub fn complete_submission(&mut self) -> bool {
        if !self.is_submitting {
            return false;
        }

        self.is_submitting = false;
        self.is_submitted = true;
        info!("submission complete");

        self.pending_scheduler.push(SchedulerCommand::EmitAfter {
            key: RESET_TIMER.to_string(),
            delay: self.reset_delay,
            event: FormEvent::ResetTimerFired,
        });
        true
    }

    pub fn fail_submission(&mut self, error: &SubmissionError) {
        warn!(%error, "submission failed");
        self.is_submitting = false;
        self.form_error = Some(format!("Submission failed: {error}"));
        self.pending_scheduler.push(SchedulerCommand::Cancel {
            key: SUBMISSION_TIMER.to_string(),
        });
    }

    /// Clears values, touched flags, errors and the success flag. Safe to
    /// call repeatedly.
    pub fn reset(&mut self) {
        if self.is_submitting {
            return;
        }
        info!("resetting form");
        self.values = FormData::default();
        self.touched = TouchedFields::default();
        self.errors.clear();
        self.is_submitted = false;
    }

    pub fn take_pending_scheduler_commands(&mut self) -> Vec<SchedulerCommand> {
        std::mem::take(&mut self.pending_scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormState, Phase, SubmitOutcome};
    use crate::core::Field;
    use crate::error::SubmissionError;
    use crate::runtime::scheduler::{RESET_TIMER, SUBMISSION_TIMER, SchedulerCommand};

    fn fill_valid(state: &mut FormState) {
        state.handle_change(Field::FirstName, "Jane".to_string());
        state.handle_change(Field::LastName, "Doe".to_string());
        state.handle_change(Field::Email, "jane@doe.com".to_string());
    }

    #[test]
    fn starts_idle() {
        let state = FormState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn change_on_untouched_field_keeps_errors_hidden() {
        let mut state = FormState::default();
        state.handle_change(Field::Email, "nope".to_string());
        assert_eq!(state.errors().get(Field::Email), None);
        assert_eq!(state.phase(), Phase::Editing);
    }

    #[test]
    fn blur_reveals_error_and_change_clears_it() {
        let mut state = FormState::default();
        state.handle_blur(Field::FirstName);
        assert_eq!(
            state.visible_error(Field::FirstName),
            Some("First name is required")
        );

        state.handle_change(Field::FirstName, "J".to_string());
        assert_eq!(state.visible_error(Field::FirstName), None);
    }

    #[test]
    fn invalid_submit_touches_everything_and_schedules_nothing() {
        let mut state = FormState::default();
        state.handle_change(Field::FirstName, "Jane".to_string());

        assert_eq!(state.handle_submit(), SubmitOutcome::Invalid);
        assert!(!state.is_submitting());
        assert!(state.touched().get(Field::Email));
        assert_eq!(state.visible_error(Field::LastName), Some("Last name is required"));
        assert_eq!(state.visible_error(Field::FirstName), None);
        assert!(state.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn submit_replaces_previous_error_snapshot() {
        let mut state = FormState::default();
        state.handle_change(Field::Email, "bad".to_string());
        state.handle_blur(Field::Email);
        fill_valid(&mut state);

        let outcome = state.handle_submit();
        assert!(matches!(outcome, SubmitOutcome::Proceed(_)));
        assert!(state.errors().is_empty());
    }

    #[test]
    fn valid_submit_schedules_completion() {
        let mut state = FormState::default();
        fill_valid(&mut state);

        let SubmitOutcome::Proceed(snapshot) = state.handle_submit() else {
            panic!("expected submission to proceed");
        };
        assert_eq!(snapshot.first_name, "Jane");
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.handle_submit(), SubmitOutcome::Busy);

        let commands = state.take_pending_scheduler_commands();
        assert!(commands.iter().any(|cmd| matches!(
            cmd,
            SchedulerCommand::EmitAfter { key, .. } if key == SUBMISSION_TIMER
        )));
    }

    #[test]
    fn completion_then_reset_returns_to_idle() {
        let mut state = FormState::default();
        fill_valid(&mut state);
        let _ = state.handle_submit();
        state.take_pending_scheduler_commands();

        assert!(state.complete_submission());
        assert_eq!(state.phase(), Phase::Submitted);
        let commands = state.take_pending_scheduler_commands();
        assert!(matches!(
            commands.as_slice(),
            [SchedulerCommand::EmitAfter { key, .. }] if key == RESET_TIMER
        ));

        state.reset();
        assert_eq!(state.phase(), Phase::Idle);
        state.reset();
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn completion_without_submission_is_ignored() {
        let mut state = FormState::default();
        assert!(!state.complete_submission());
        assert!(!state.is_submitted());
    }

    #[test]
    fn edit_after_success_dismisses_banner() {
        let mut state = FormState::default();
        fill_valid(&mut state);
        let _ = state.handle_submit();
        state.complete_submission();

        state.handle_change(Field::FirstName, "Janet".to_string());
        assert!(!state.is_submitted());
        assert_eq!(state.values().first_name, "Janet");
    }

    #[test]
    fn failed_submission_keeps_data_for_retry() {
        let mut state = FormState::default();
        fill_valid(&mut state);
        let _ = state.handle_submit();
        state.take_pending_scheduler_commands();

        state.fail_submission(&SubmissionError::Network("timed out".to_string()));
        assert!(!state.is_submitting());
        assert!(!state.is_submitted());
        assert_eq!(state.values().email, "jane@doe.com");
        assert!(state.touched().get(Field::Email));
        assert_eq!(
            state.form_error(),
            Some("Submission failed: network error: timed out")
        );
        assert!(!state.complete_submission());
    }
}
