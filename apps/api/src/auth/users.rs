use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub education: &'a str,
    pub city: &'a str,
}

/// Inserts a user. A taken email is a `Conflict`.
pub async fn create_user(pool: &PgPool, user: NewUser<'_>) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, education, city)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.education)
    .bind(user.city)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(id),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict("Email already exists.".to_string()))
        }
        Err(e) => Err(AppError::Database(e)),
    }
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Asha@Example.COM "), "asha@example.com");
    }
}
