//! Field value types and format validation

use crate::core::id::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A polymorphic field value used for secondary-key lookup in the stores.
///
/// Entities expose their indexed fields as `FieldValue`s so a store can
/// filter a collection without knowing the concrete record type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Id(EntityId),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an entity id if possible
    pub fn as_id(&self) -> Option<&EntityId> {
        match self {
            FieldValue::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&EntityId> for FieldValue {
    fn from(id: &EntityId) -> Self {
        FieldValue::Id(id.clone())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    EntityId,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::EntityId => EntityId::parse(value).is_ok(),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_id() {
        let id = EntityId::generate();
        let value = FieldValue::Id(id.clone());
        assert_eq!(value.as_id(), Some(&id));
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_date_equality() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(FieldValue::Date(day), FieldValue::Date(day));
        assert_ne!(
            FieldValue::Date(day),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())
        );
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.is_valid("test@example.com"));
        assert!(format.is_valid("user.name+tag@example.co.uk"));
        assert!(!format.is_valid("invalid-email"));
        assert!(!format.is_valid("@example.com"));
    }

    #[test]
    fn test_entity_id_validation() {
        let format = FieldFormat::EntityId;
        let valid = EntityId::generate();

        assert!(format.is_valid(valid.as_str()));
        assert!(!format.is_valid("not-an-id"));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());

        assert!(format.is_valid("ABC123"));
        assert!(!format.is_valid("abc123"));
        assert!(!format.is_valid("ABCD123"));
    }
}
