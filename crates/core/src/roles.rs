//! Role model and role resolution.
//!
//! Role names must match the seed data in `20260301000001_create_users_and_roles.sql`.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;
use crate::types::{BoxError, DbId};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_USER: &str = "user";

/// A user's role.
///
/// Closed on purpose: adding a role means deciding here whether it may
/// self-approve, instead of falling through a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Moderator => ROLE_MODERATOR,
            Role::User => ROLE_USER,
        }
    }

    /// Whether this role may review content and have its own submissions
    /// approved without review.
    pub fn is_privileged(self) -> bool {
        match self {
            Role::Admin | Role::Moderator => true,
            Role::User => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MODERATOR => Ok(Role::Moderator),
            ROLE_USER => Ok(Role::User),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

/// Looks up the current role of a user.
///
/// `Ok(None)` means the user (or their role) does not exist. Callers must
/// treat that as a failure rather than assume an unprivileged role.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    async fn get_role(&self, user_id: DbId) -> Result<Option<Role>, BoxError>;
}
