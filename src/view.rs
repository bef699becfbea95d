use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{Field, FormData};
use crate::state::form::FormState;

pub const SUCCESS_MESSAGE: &str =
    "Form submitted successfully! Your information has been received.";

/// What a presentation layer needs to draw the form after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub values: FormData,
    pub visible_errors: BTreeMap<Field, String>,
    pub is_submitting: bool,
    pub is_submitted: bool,
    pub form_error: Option<String>,
}

impl RenderModel {
    pub fn from_state(state: &FormState) -> Self {
        let visible_errors = Field::ALL
            .into_iter()
            .filter_map(|field| {
                state
                    .visible_error(field)
                    .map(|message| (field, message.to_string()))
            })
            .collect();

        Self {
            values: state.values().clone(),
            visible_errors,
            is_submitting: state.is_submitting(),
            is_submitted: state.is_submitted(),
            form_error: state.form_error().map(str::to_string),
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.visible_errors.get(&field).map(String::as_str)
    }

    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Submitting..."
        } else {
            "Submit"
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.is_submitted.then_some(SUCCESS_MESSAGE)
    }
}

pub fn render_model_to_json(model: &RenderModel) -> serde_json::Value {
    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            serde_json::json!({
                "name": field.name(),
                "label": field.label(),
                "value": model.values.get(field),
                "error": model.error_for(field),
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "fields": fields,
        "submit": {
            "label": model.submit_label(),
            "enabled": model.submit_enabled(),
        },
        "banner": model.success_message(),
        "formError": model.form_error,
        "isSubmitting": model.is_submitting,
        "isSubmitted": model.is_submitted,
    })
}

#[cfg(test)]
mod tests {
    use super::{RenderModel, SUCCESS_MESSAGE, render_model_to_json};
    use crate::core::Field;
    use crate::state::form::FormState;

    #[test]
    fn only_touched_errors_are_visible() {
        let mut state = FormState::default();
        state.handle_change(Field::Email, "nope".to_string());
        state.handle_blur(Field::FirstName);

        let model = RenderModel::from_state(&state);
        assert_eq!(model.error_for(Field::FirstName), Some("First name is required"));
        assert_eq!(model.error_for(Field::Email), None);
        assert_eq!(model.visible_errors.len(), 1);
    }

    #[test]
    fn submitting_disables_button() {
        let mut state = FormState::default();
        state.handle_change(Field::FirstName, "Jane".to_string());
        state.handle_change(Field::LastName, "Doe".to_string());
        state.handle_change(Field::Email, "jane@doe.com".to_string());
        let _ = state.handle_submit();

        let model = RenderModel::from_state(&state);
        assert!(!model.submit_enabled());
        assert_eq!(model.submit_label(), "Submitting...");
        assert_eq!(model.success_message(), None);

        state.complete_submission();
        let model = RenderModel::from_state(&state);
        assert_eq!(model.success_message(), Some(SUCCESS_MESSAGE));
        assert_eq!(model.submit_label(), "Submit");
    }

    #[test]
    fn json_lists_fields_in_display_order() {
        let mut state = FormState::default();
        state.handle_blur(Field::LastName);
        let json = render_model_to_json(&RenderModel::from_state(&state));

        assert_eq!(json["fields"][0]["name"], "firstName");
        assert_eq!(json["fields"][1]["error"], "Last name is required");
        assert!(json["fields"][2]["error"].is_null());
        assert_eq!(json["submit"]["enabled"], true);
        assert!(json["banner"].is_null());
    }

    #[test]
    fn serialized_model_uses_field_names_as_keys() {
        let mut state = FormState::default();
        state.handle_blur(Field::Email);
        let json = serde_json::to_value(RenderModel::from_state(&state)).expect("serialize");
        assert_eq!(json["visibleErrors"]["email"], "Email is required");
        assert_eq!(json["isSubmitting"], false);
    }
}
