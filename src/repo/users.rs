use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::user::{Identity, User};

#[derive(Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Projection used by the authentication extractor; never loads the
    /// password digest.
    pub async fn identity_by_id(&self, id: i64) -> Result<Option<Identity>, AppError> {
        let identity =
            sqlx::query_as::<_, Identity>("SELECT id, name, email FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(identity)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Creates an unconfirmed user in a single write, so a crash can never
    /// leave an account without its password or confirmation code.
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password: &str,
        token: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, token) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn confirm(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET confirmed = 1, token = NULL WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_token(&self, id: i64, token: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET token = ? WHERE id = ?")
            .bind(token)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_password(&self, id: i64, password: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Reset flow: the new digest and the token clear land in one write.
    pub async fn set_password_clear_token(
        &self,
        id: i64,
        password: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password = ?, token = NULL WHERE id = ?")
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
