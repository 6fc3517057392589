//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The closed set of roles a marketplace user can hold.
///
/// Serialized in upper case (`"PARENT"`, `"COMPANY"`, `"ADMIN"`) to match the
/// role claim issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Browses listings, keeps favorites.
    Parent,
    /// Owns listings; mutations are gated by its subscription.
    Company,
    /// Platform operator; bypasses billing checks.
    Admin,
}

impl Role {
    /// Returns true for roles allowed to manage listings at all.
    pub fn can_manage_listings(&self) -> bool {
        matches!(self, Role::Company | Role::Admin)
    }

    /// Returns true if this role bypasses billing and ownership checks.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Parent => "PARENT",
            Role::Company => "COMPANY",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PARENT" => Ok(Role::Parent),
            "COMPANY" => Ok(Role::Company),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("company".parse::<Role>().unwrap(), Role::Company);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Parent ".parse::<Role>().unwrap(), Role::Parent);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn only_company_and_admin_manage_listings() {
        assert!(Role::Company.can_manage_listings());
        assert!(Role::Admin.can_manage_listings());
        assert!(!Role::Parent.can_manage_listings());
    }

    #[test]
    fn serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Company).unwrap(), "\"COMPANY\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
