use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::user::User;

/// Keeps the local `users` mirror in step with the identity provider's
/// token claims.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the caller on first sight. Later calls only overwrite names
    /// and email when the token actually carries them.
    pub async fn sync(&self, user: &AuthUser) -> Result<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, first_name, last_name, email)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4)
            ON CONFLICT (id) DO UPDATE SET
                first_name = COALESCE($2, users.first_name),
                last_name = COALESCE($3, users.last_name),
                email = COALESCE($4, users.email),
                updated_at = NOW()
            RETURNING id, first_name, last_name, email, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(user.first_name.as_deref())
        .bind(user.last_name.as_deref())
        .bind(user.email.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
