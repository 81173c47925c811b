use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Account role carried in session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// School owner; the root of a tenant
    Admin,
    /// Delegated school head, owned by an admin
    Principal,
    /// Delegated staff administrator, owned by an admin
    SubAdmin,
    /// Platform-wide administrator
    SuperAdmin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Principal => "principal",
            Self::SubAdmin => "sub_admin",
            Self::SuperAdmin => "super_admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }

    /// Roles whose tenant must be looked up through the admin hierarchy.
    ///
    /// Everyone else is scoped directly by the id in their token.
    pub fn resolves_through_hierarchy(&self) -> bool {
        matches!(self, Self::Admin | Self::Principal | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Case-insensitive exact match on the snake_case name.
    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "principal" => Ok(Self::Principal),
            "sub_admin" => Ok(Self::SubAdmin),
            "super_admin" => Ok(Self::SuperAdmin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
