use crate::core::Field;

/// Everything that can move the form's state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Change { field: Field, value: String },
    Blur { field: Field },
    Submit,
    SubmissionTimerFired,
    ResetTimerFired,
}

impl FormEvent {
    pub fn change(field: Field, value: impl Into<String>) -> Self {
        Self::Change {
            field,
            value: value.into(),
        }
    }

    pub fn blur(field: Field) -> Self {
        Self::Blur { field }
    }
}
