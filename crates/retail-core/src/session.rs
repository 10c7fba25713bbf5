//! # Sessions and Roles
//!
//! A [`SessionContext`] is created at login, passed by value or reference into
//! every service call, and dropped (or turned back into
//! [`SessionContext::Unauthenticated`]) at logout. Nothing here is global.
//!
//! ## Authorization Matrix
//! ```text
//! ┌──────────────────────────┬──────────┬──────────────────┬───────┐
//! │ Operation                │ Customer │ Manager          │ Admin │
//! ├──────────────────────────┼──────────┼──────────────────┼───────┤
//! │ list stores / products   │    ✓     │        ✓         │   ✓   │
//! │ place order              │    ✓     │        ✓         │   ✓   │
//! │ update product           │    ✗     │ own store only   │   ✓   │
//! │ store reports            │    ✗     │ own store only   │   ✓   │
//! │ supply request           │    ✗     │ own store only   │   ✗   │
//! │ update user              │    ✗     │        ✗         │   ✓   │
//! └──────────────────────────┴──────────┴──────────────────┴───────┘
//! ```
//!
//! The role is resolved once at login and cached. Every check below is an
//! exhaustive `match` on [`Role`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Store, UserId};

// =============================================================================
// Role
// =============================================================================

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    /// Every recognized role, in privilege order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Manager, Role::Admin];

    /// The lowercase name stored in the users table.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Parses an exact role name. `"Manager "` and `"managers"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated half of a [`SessionContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: Uuid,
    user_id: UserId,
    user_name: String,
    role: Role,
    logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Identifier for correlating log lines of one login.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Role cached at login.
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }

    /// Managers and admins may edit a store's catalog; managers only their own.
    pub fn require_catalog_access(&self, store: &Store) -> CoreResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Manager => self.require_owner(store),
            Role::Customer => Err(CoreError::RoleNotPermitted {
                role: self.role,
                action: "update products",
            }),
        }
    }

    /// Same rule as the catalog: own store for managers, any store for admins.
    pub fn require_report_access(&self, store: &Store) -> CoreResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Manager => self.require_owner(store),
            Role::Customer => Err(CoreError::RoleNotPermitted {
                role: self.role,
                action: "view store reports",
            }),
        }
    }

    /// Only the store's own manager may request supplies.
    pub fn require_supply_access(&self, store: &Store) -> CoreResult<()> {
        match self.role {
            Role::Manager => self.require_owner(store),
            Role::Customer | Role::Admin => Err(CoreError::RoleNotPermitted {
                role: self.role,
                action: "place supply requests",
            }),
        }
    }

    /// User maintenance is admin-only.
    pub fn require_admin(&self) -> CoreResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Customer | Role::Manager => Err(CoreError::RoleNotPermitted {
                role: self.role,
                action: "update users",
            }),
        }
    }

    fn require_owner(&self, store: &Store) -> CoreResult<()> {
        if store.manager_id == self.user_id {
            Ok(())
        } else {
            Err(CoreError::NotStoreManager {
                user_id: self.user_id,
                store_id: store.id,
            })
        }
    }
}

// =============================================================================
// Session Context
// =============================================================================

/// Who is calling: nobody, or one logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionContext {
    /// No user is logged in.
    #[default]
    Unauthenticated,
    /// A user logged in and their role was resolved.
    Authenticated(Session),
}

impl SessionContext {
    /// Builds the context returned by a successful login.
    pub fn authenticated(user_id: UserId, user_name: impl Into<String>, role: Role) -> Self {
        SessionContext::Authenticated(Session {
            session_id: Uuid::new_v4(),
            user_id,
            user_name: user_name.into(),
            role,
            logged_in_at: Utc::now(),
        })
    }

    /// Returns the session or [`CoreError::Unauthenticated`].
    pub fn session(&self) -> CoreResult<&Session> {
        match self {
            SessionContext::Authenticated(session) => Ok(session),
            SessionContext::Unauthenticated => Err(CoreError::Unauthenticated),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionContext::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session().ok().map(Session::user_id)
    }

    pub fn role(&self) -> Option<Role> {
        self.session().ok().map(Session::role)
    }

    /// Ends the session.
    pub fn logout(self) -> SessionContext {
        SessionContext::Unauthenticated
    }
}
