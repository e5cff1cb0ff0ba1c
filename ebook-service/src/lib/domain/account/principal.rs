use std::fmt;
use std::str::FromStr;

use crate::domain::account::errors::AccessError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::models::AdminId;
use crate::domain::account::models::UserId;

/// Authorization tier carried in session tokens.
///
/// Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    pub fn is_admin_tier(&self) -> bool {
        *self >= Role::Admin
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved identity making a request.
///
/// The superadmin is configured out of band and never stored, so it has no
/// identifier. A user's role is the stored one, which lets promoted users act
/// at admin tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Superadmin { email: String },
    Admin { id: AdminId, email: String },
    User { id: UserId, email: String, role: Role },
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::Superadmin { .. } => Role::Superadmin,
            Principal::Admin { .. } => Role::Admin,
            Principal::User { role, .. } => *role,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::Superadmin { email }
            | Principal::Admin { email, .. }
            | Principal::User { email, .. } => email,
        }
    }

    /// Admit admins and the superadmin.
    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.role().is_admin_tier() {
            Ok(())
        } else {
            Err(AccessError::Forbidden("Access denied. Admins only.".to_string()))
        }
    }

    /// Admit only the superadmin.
    pub fn require_superadmin(&self) -> Result<(), AccessError> {
        match self {
            Principal::Superadmin { .. } => Ok(()),
            _ => Err(AccessError::Forbidden(
                "Access denied. Super Admins only.".to_string(),
            )),
        }
    }

    /// Admit only principals backed by a users row and return that row's id.
    pub fn require_user(&self) -> Result<UserId, AccessError> {
        match self {
            Principal::User { id, .. } => Ok(*id),
            _ => Err(AccessError::Forbidden(
                "Only user accounts can perform this action".to_string(),
            )),
        }
    }

    /// Admit the given user themself, or any admin-tier principal.
    pub fn require_self_or_admin(&self, user_id: &UserId) -> Result<(), AccessError> {
        match self {
            Principal::User { id, .. } if id == user_id => Ok(()),
            _ => self.require_admin(),
        }
    }

    /// Admin row that should be recorded as creator of new accounts, if any.
    pub fn admin_id(&self) -> Option<AdminId> {
        match self {
            Principal::Admin { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Superadmin { .. } => write!(f, "superadmin"),
            Principal::Admin { id, .. } => write!(f, "admin:{}", id),
            Principal::User { id, .. } => write!(f, "user:{}", id),
        }
    }
}
