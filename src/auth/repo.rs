use sqlx::PgPool;

use crate::auth::repo_types::User;
use crate::auth::services;
use crate::error::{self, Error};

impl User {
    /// Find a user by email. Lookup primitive shared by credential checks.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Hash the password and insert a new user. Empty email or password is
    /// rejected here even when the request boundary already validated it.
    pub async fn create(db: &PgPool, email: &str, password: &str) -> Result<User, Error> {
        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push("email".to_string());
        }
        if password.is_empty() {
            missing.push("password".to_string());
        }
        if !missing.is_empty() {
            return Err(Error::Validation(missing));
        }

        let password_hash = services::hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if error::is_unique_violation(&e) {
                Error::DuplicateEmail
            } else {
                Error::Database(e)
            }
        })?;
        Ok(user)
    }

    /// Check a login attempt. Unknown email and wrong password collapse to
    /// the same `InvalidCredentials` so callers cannot tell them apart.
    pub async fn validate_credentials(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let user = Self::find_by_email(db, email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        let ok = services::verify_password(password, &user.password_hash)?;
        if !ok {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }
}
