// Account domain types
//
// The Account entity backs credential verification and access control.
// Used by both the API and storage crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Privilege level of an account.
///
/// Variants are ordered so that a plain comparison answers "does this role
/// meet the required minimum" (`Administrator > Standard`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Standard,
    Administrator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Standard => write!(f, "standard"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "administrator" => Role::Administrator,
            _ => Role::Standard,
        }
    }
}

/// Activation status of an account. Disabled accounts cannot authenticate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Disabled,
    Enabled,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Disabled => write!(f, "disabled"),
            AccountStatus::Enabled => write!(f, "enabled"),
        }
    }
}

impl From<&str> for AccountStatus {
    fn from(s: &str) -> Self {
        match s {
            "disabled" => AccountStatus::Disabled,
            _ => AccountStatus::Enabled,
        }
    }
}

/// An administrative account.
///
/// This is the API-facing shape; the password hash stays in the storage
/// row types and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Administrator > Role::Standard);
        assert!(Role::Standard >= Role::Standard);
        assert!(!(Role::Standard >= Role::Administrator));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), "\"standard\"");

        let role: Role = serde_json::from_str("\"administrator\"").unwrap();
        assert_eq!(role, Role::Administrator);
    }

    #[test]
    fn test_status_roundtrip() {
        let status: AccountStatus = serde_json::from_str("\"disabled\"").unwrap();
        assert_eq!(status, AccountStatus::Disabled);
        assert_eq!(AccountStatus::from("enabled"), AccountStatus::Enabled);
        assert_eq!(AccountStatus::Enabled.to_string(), "enabled");
    }
}
