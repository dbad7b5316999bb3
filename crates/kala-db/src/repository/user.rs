//! # User Repository
//!
//! Accounts that can log in. Created by an admin (or by the one-time
//! bootstrap), never edited or deleted through the app.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kala_core::{Role, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// Fields an admin fills in to create a user.
///
/// `password_hash` must already be hashed (see [`crate::hash_password`]).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Counts every account. Zero means the app was never initialized.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Gets a user by ID (session lookups).
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email (login). Matching is exact.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists every user ordered by name.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored user with its generated ID
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            created_at: Utc::now(),
        };

        debug!(id = %user.id, email = %user.email, role = user.role.as_str(), "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("email", &user.email),
            other => other,
        })?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::memory_db;

    fn new_user(name: &str, email: &str, role: Role) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = memory_db().await;
        let users = db.users();

        let ana = users
            .insert(&new_user("Ana", "ana@kala", Role::Employee))
            .await
            .unwrap();

        assert_eq!(users.count().await.unwrap(), 1);

        let by_email = users.get_by_email("ana@kala").await.unwrap().unwrap();
        assert_eq!(by_email.id, ana.id);
        assert_eq!(by_email.role, Role::Employee);

        let by_id = users.get_by_id(&ana.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ana@kala");

        assert!(users.get_by_email("nobody@kala").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = memory_db().await;
        let users = db.users();

        users
            .insert(&new_user("Ana", "ana@kala", Role::Employee))
            .await
            .unwrap();
        let err = users
            .insert(&new_user("Ana Bis", "ana@kala", Role::Admin))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ana@kala");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let db = memory_db().await;
        let users = db.users();

        for (name, email) in [("Zoe", "z@kala"), ("Ana", "a@kala"), ("Mora", "m@kala")] {
            users
                .insert(&new_user(name, email, Role::Employee))
                .await
                .unwrap();
        }

        let names: Vec<String> = users.list().await.unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ana", "Mora", "Zoe"]);
    }
}
