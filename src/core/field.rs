use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    /// Fields in display order.
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    /// Name used on the event surface.
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::FirstName => "Enter your first name",
            Field::LastName => "Enter your last name",
            Field::Email => "your.email@example.com",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw field values, stored exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchedFields {
    pub first_name: bool,
    pub last_name: bool,
    pub email: bool,
}

impl TouchedFields {
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Email => self.email,
        }
    }

    pub fn touch(&mut self, field: Field) {
        match field {
            Field::FirstName => self.first_name = true,
            Field::LastName => self.last_name = true,
            Field::Email => self.email = true,
        }
    }

    pub fn touch_all(&mut self) {
        for field in Field::ALL {
            self.touch(field);
        }
    }

    pub fn any(&self) -> bool {
        self.first_name || self.last_name || self.email
    }
}

/// Error message per field. A missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    entries: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Writes `error` for `field`, or clears the entry when `error` is `None`.
    pub fn set(&mut self, field: Field, error: Option<String>) {
        match error {
            Some(message) => {
                self.entries.insert(field, message);
            }
            None => {
                self.entries.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FormData, FormErrors, TouchedFields};

    #[test]
    fn field_names_parse_back() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert!("phone".parse::<Field>().is_err());
        assert!("FirstName".parse::<Field>().is_err());
    }

    #[test]
    fn form_data_stores_values_verbatim() {
        let mut data = FormData::default();
        data.set(Field::Email, "  jane@doe.com ");
        assert_eq!(data.get(Field::Email), "  jane@doe.com ");
        assert!(!data.is_empty());
    }

    #[test]
    fn touch_all_marks_every_field() {
        let mut touched = TouchedFields::default();
        assert!(!touched.any());
        touched.touch_all();
        assert!(Field::ALL.iter().all(|field| touched.get(*field)));
    }

    #[test]
    fn setting_none_removes_error_entry() {
        let mut errors = FormErrors::new();
        errors.set(Field::LastName, Some("Last name is required".to_string()));
        assert_eq!(errors.get(Field::LastName), Some("Last name is required"));

        errors.set(Field::LastName, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn form_data_serializes_with_event_surface_names() {
        let data = FormData {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.com".to_string(),
        };
        let json = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["email"], "jane@doe.com");
    }
}
