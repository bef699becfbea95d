use std::sync::LazyLock;

use regex::Regex;

use crate::core::field::{Field, FormData, FormErrors};

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Permissive on purpose: something, `@`, something, `.`, something, with no
/// whitespace or extra `@` in any part. Not an RFC 5322 check. `\s` is the
/// Unicode `White_Space` class, which leaves out U+FEFF, so a BOM is accepted.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

static FIRST_NAME_RULES: LazyLock<Vec<Validator>> =
    LazyLock::new(|| vec![required("First name is required")]);

static LAST_NAME_RULES: LazyLock<Vec<Validator>> =
    LazyLock::new(|| vec![required("Last name is required")]);

static EMAIL_RULES: LazyLock<Vec<Validator>> = LazyLock::new(|| {
    vec![
        required("Email is required"),
        matches(&EMAIL_REGEX, "Please enter a valid email address"),
    ]
});

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn matches(re: &'static Regex, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn rules_for(field: Field) -> &'static [Validator] {
    match field {
        Field::FirstName => FIRST_NAME_RULES.as_slice(),
        Field::LastName => LAST_NAME_RULES.as_slice(),
        Field::Email => EMAIL_RULES.as_slice(),
    }
}

/// Returns the error message for `value`, or `None` when it is valid.
pub fn validate_field(field: Field, value: &str) -> Option<String> {
    run_validators(rules_for(field), value).err()
}

/// Validates every field independently into a fresh error snapshot.
pub fn validate_form(data: &FormData) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in Field::ALL {
        errors.set(field, validate_field(field, data.get(field)));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{validate_field, validate_form};
    use crate::core::field::{Field, FormData};

    #[test]
    fn blank_names_are_required() {
        assert_eq!(
            validate_field(Field::FirstName, ""),
            Some("First name is required".to_string())
        );
        assert_eq!(
            validate_field(Field::LastName, "   \t"),
            Some("Last name is required".to_string())
        );
        assert_eq!(validate_field(Field::FirstName, " Jane "), None);
    }

    #[test]
    fn whitespace_email_reports_required_not_format() {
        assert_eq!(
            validate_field(Field::Email, "    "),
            Some("Email is required".to_string())
        );
    }

    #[test]
    fn email_format_rules() {
        let invalid = Some("Please enter a valid email address".to_string());
        assert_eq!(validate_field(Field::Email, "a@b"), invalid);
        assert_eq!(validate_field(Field::Email, "notanemail"), invalid);
        assert_eq!(validate_field(Field::Email, "a@@b.c"), invalid);
        assert_eq!(validate_field(Field::Email, "a b@c.d"), invalid);
        assert_eq!(validate_field(Field::Email, "a@b.c"), None);
        assert_eq!(validate_field(Field::Email, "jane@doe.com"), None);
    }

    #[test]
    fn surrounding_spaces_fail_the_format_check() {
        // The pattern runs on the untrimmed value.
        assert_eq!(
            validate_field(Field::Email, " a@b.c "),
            Some("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn byte_order_mark_is_not_whitespace() {
        assert_eq!(validate_field(Field::Email, "a\u{FEFF}@b.c"), None);
    }

    #[test]
    fn validate_form_collects_every_field() {
        let errors = validate_form(&FormData::default());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Email), Some("Email is required"));

        let data = FormData {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.com".to_string(),
        };
        assert!(validate_form(&data).is_empty());
    }
}
