// Person domain types
//
// Persons are the records this system administers. They are not accounts
// and cannot authenticate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Enrollment status of a person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
    Active,
    Suspended,
    Withdrawn,
    Graduated,
}

impl std::fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonStatus::Active => write!(f, "active"),
            PersonStatus::Suspended => write!(f, "suspended"),
            PersonStatus::Withdrawn => write!(f, "withdrawn"),
            PersonStatus::Graduated => write!(f, "graduated"),
        }
    }
}

impl From<&str> for PersonStatus {
    fn from(s: &str) -> Self {
        match s {
            "suspended" => PersonStatus::Suspended,
            "withdrawn" => PersonStatus::Withdrawn,
            "graduated" => PersonStatus::Graduated,
            _ => PersonStatus::Active,
        }
    }
}

/// A person record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    pub status: PersonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_status_roundtrip() {
        for (s, expected) in [
            ("active", PersonStatus::Active),
            ("suspended", PersonStatus::Suspended),
            ("withdrawn", PersonStatus::Withdrawn),
            ("graduated", PersonStatus::Graduated),
        ] {
            assert_eq!(PersonStatus::from(s), expected);
            assert_eq!(expected.to_string(), s);
        }
    }
}
