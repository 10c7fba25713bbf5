//! # Admin Service
//!
//! User record maintenance. Every edit targets exactly one user by id.

use tracing::{info, warn};

use retail_core::validation::validate_user_name;
use retail_core::{Coordinates, Role, SessionContext, User, UserId, UserUpdate};
use retail_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Admin-only user maintenance.
#[derive(Debug, Clone)]
pub struct AdminService {
    db: Database,
}

impl AdminService {
    pub fn new(db: Database) -> Self {
        AdminService { db }
    }

    /// Overwrites a user's name, coordinates and role.
    ///
    /// `role` is the textual role from the client (`customer`, `manager`,
    /// `admin`); anything else is a validation error.
    ///
    /// ## Errors
    /// * `Authorization` - caller is not an admin
    /// * `Validation` - empty name, coordinates outside [0, 100], unknown role
    /// * `NotFound` - no user has `target`; nothing is written
    pub async fn update_user(
        &self,
        ctx: &SessionContext,
        target: UserId,
        name: &str,
        latitude: f64,
        longitude: f64,
        role: &str,
    ) -> ServiceResult<User> {
        let session = ctx.session()?;
        if let Err(denied) = session.require_admin() {
            warn!(user_id = %session.user_id(), target = %target, "User update denied");
            return Err(denied.into());
        }

        validate_user_name(name)?;
        let update = UserUpdate {
            name: name.trim().to_string(),
            coordinates: Coordinates::new(latitude, longitude)?,
            role: role.trim().parse::<Role>()?,
        };

        self.db.users().update(target, &update).await?;

        info!(
            admin_id = %session.user_id(),
            target = %target,
            role = %update.role,
            "User updated"
        );

        self.db
            .users()
            .get_by_id(target)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target))
    }
}
