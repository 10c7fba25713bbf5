//! # Session Service
//!
//! Registration and login. A successful login resolves the user's role once
//! and hands back a [`SessionContext`] that every other service takes as its
//! first argument.
//!
//! ```text
//!   register(name, credential, lat, lon) ──► UserId (role = customer)
//!
//!   login(name, credential)
//!        │
//!        ├── no (name, credential) row ──► ServiceError::Authentication
//!        └── row ──► SessionContext::Authenticated { user_id, role }
//!                         │
//!                         ▼
//!                    logout() ──► SessionContext::Unauthenticated
//! ```

use tracing::{info, warn};

use retail_core::validation::{validate_credential, validate_user_name};
use retail_core::{Coordinates, Role, SessionContext, Store, UserId};
use retail_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Registration, login and identity lookups.
#[derive(Debug, Clone)]
pub struct SessionService {
    db: Database,
}

impl SessionService {
    pub fn new(db: Database) -> Self {
        SessionService { db }
    }

    /// Registers a new customer.
    ///
    /// ## Errors
    /// * `Validation` - empty name or credential, coordinates outside [0, 100]
    /// * `Conflict` - the (name, credential) pair is already registered
    pub async fn register(
        &self,
        name: &str,
        credential: &str,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<UserId> {
        validate_user_name(name)?;
        validate_credential(credential)?;
        let location = Coordinates::new(latitude, longitude)?;
        let name = name.trim();

        if self.db.users().exists_with_credentials(name, credential).await? {
            return Err(ServiceError::Conflict {
                message: format!("user '{name}' is already registered"),
            });
        }

        // The unique index still catches a registration racing this one
        let user_id = self
            .db
            .users()
            .insert(name, credential, location, Role::Customer)
            .await?;

        info!(user_id = %user_id, "User registered");
        Ok(user_id)
    }

    /// Resolves a session for an exact (name, credential) match.
    pub async fn login(&self, name: &str, credential: &str) -> ServiceResult<SessionContext> {
        let user = self
            .db
            .users()
            .find_by_credentials(name.trim(), credential)
            .await?;

        let Some(user) = user else {
            warn!("Login rejected");
            return Err(ServiceError::Authentication {
                reason: "no user matches that name and password".to_string(),
            });
        };

        let ctx = SessionContext::authenticated(user.id, user.name, user.role);
        if let SessionContext::Authenticated(session) = &ctx {
            info!(
                user_id = %session.user_id(),
                role = %session.role(),
                session_id = %session.session_id(),
                "Logged in"
            );
        }
        Ok(ctx)
    }

    /// The role resolved at login.
    pub fn role(&self, ctx: &SessionContext) -> ServiceResult<Role> {
        Ok(ctx.session()?.role())
    }

    /// Stores the caller manages, by id. Empty for anyone who manages none.
    pub async fn managed_stores(&self, ctx: &SessionContext) -> ServiceResult<Vec<Store>> {
        let session = ctx.session()?;
        Ok(self.db.stores().managed_by(session.user_id()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use retail_db::DbConfig;

    async fn service() -> SessionService {
        SessionService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let sessions = service().await;

        let id = sessions.register("amy", "secret", 10.0, 10.0).await.unwrap();
        let ctx = sessions.login("amy", "secret").await.unwrap();

        assert_eq!(ctx.user_id(), Some(id));
        assert_eq!(sessions.role(&ctx).unwrap(), Role::Customer);

        let ctx = ctx.logout();
        assert!(!ctx.is_authenticated());
        assert_eq!(
            sessions.role(&ctx).unwrap_err().code(),
            ErrorCode::AuthenticationFailed
        );
    }

    #[tokio::test]
    async fn test_register_validation() {
        let sessions = service().await;

        for (name, credential, lat, lon) in [
            ("", "pw", 1.0, 1.0),
            ("amy", "", 1.0, 1.0),
            ("amy", "pw", -1.0, 1.0),
            ("amy", "pw", 1.0, 100.5),
        ] {
            let err = sessions.register(name, credential, lat, lon).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);
            assert!(err.is_recoverable());
        }
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let sessions = service().await;

        sessions.register("amy", "pw", 1.0, 1.0).await.unwrap();
        let err = sessions.register("amy", "pw", 2.0, 2.0).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let sessions = service().await;
        sessions.register("amy", "pw", 1.0, 1.0).await.unwrap();

        let err = sessions.login("amy", "wrong").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AuthenticationFailed);

        let err = sessions.login("nobody", "pw").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_managed_stores_requires_login() {
        let sessions = service().await;

        let err = sessions
            .managed_stores(&SessionContext::Unauthenticated)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AuthenticationFailed);
    }
}
