//! # User Repository
//!
//! Registration, credential lookup and admin edits of the `users` table.
//!
//! Credentials are compared by the database (`WHERE name = ? AND password = ?`);
//! this crate never inspects them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use retail_core::{Coordinates, Role, User, UserId, UserUpdate};

const USER_COLUMNS: &str = "id, name, latitude, longitude, role";

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns the generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the (name, credential) pair is taken
    pub async fn insert(
        &self,
        name: &str,
        credential: &str,
        location: Coordinates,
        role: Role,
    ) -> DbResult<UserId> {
        debug!(name = %name, role = %role, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, password, latitude, longitude, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(name)
        .bind(credential)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: name.to_string(),
            },
            other => other,
        })?;

        Ok(UserId::new(result.last_insert_rowid()))
    }

    /// Looks a user up by exact (name, credential) match.
    pub async fn find_by_credentials(&self, name: &str, credential: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name = ?1 AND password = ?2"
        ))
        .bind(name)
        .bind(credential)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Checks whether the (name, credential) pair is already registered.
    pub async fn exists_with_credentials(&self, name: &str, credential: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name = ?1 AND password = ?2")
                .bind(name)
                .bind(credential)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Overwrites name, coordinates and role of exactly one user.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no user has this id; nothing changed
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> DbResult<()> {
        debug!(user_id = %id, role = %update.role, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?1, latitude = ?2, longitude = ?3, role = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&update.name)
        .bind(update.coordinates.latitude)
        .bind(update.coordinates.longitude)
        .bind(update.role)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn at(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_credentials() {
        let db = test_db().await;
        let repo = db.users();

        let id = repo
            .insert("amy", "pw", at(10.0, 10.0), Role::Customer)
            .await
            .unwrap();

        let user = repo.find_by_credentials("amy", "pw").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.coordinates(), at(10.0, 10.0));

        assert!(repo.find_by_credentials("amy", "nope").await.unwrap().is_none());
        assert!(repo.exists_with_credentials("amy", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_credentials_rejected() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert("amy", "pw", at(1.0, 1.0), Role::Customer).await.unwrap();
        let err = repo
            .insert("amy", "pw", at(2.0, 2.0), Role::Customer)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Same name with a different credential is a different user
        assert!(repo.insert("amy", "other", at(2.0, 2.0), Role::Customer).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_touches_only_target() {
        let db = test_db().await;
        let repo = db.users();

        let a = repo.insert("a", "pw", at(1.0, 1.0), Role::Customer).await.unwrap();
        let b = repo.insert("b", "pw", at(2.0, 2.0), Role::Customer).await.unwrap();

        let update = UserUpdate {
            name: "alice".to_string(),
            coordinates: at(50.0, 50.0),
            role: Role::Manager,
        };
        repo.update(a, &update).await.unwrap();

        let a = repo.get_by_id(a).await.unwrap().unwrap();
        assert_eq!(a.name, "alice");
        assert_eq!(a.role, Role::Manager);

        let b = repo.get_by_id(b).await.unwrap().unwrap();
        assert_eq!(b.name, "b");
        assert_eq!(b.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let db = test_db().await;
        let update = UserUpdate {
            name: "ghost".to_string(),
            coordinates: at(1.0, 1.0),
            role: Role::Admin,
        };

        let err = db.users().update(UserId::new(999), &update).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
