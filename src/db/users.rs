use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::models::{CreateUser, User, UserRole};

const USER_FIELDS: &str = "id, username, email, password_hash, role, created_at, updated_at";

fn map_row_to_user(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: row
            .get::<String, _>("role")
            .try_into()
            .unwrap_or(UserRole::User),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database {
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let password_hash = bcrypt::hash(&user.password, 12)?;
        let now = Utc::now();

        let query_str = format!(
            r#"
            INSERT INTO users (username, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_FIELDS
        );

        let row = sqlx::query(&query_str)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&password_hash)
            .bind(UserRole::User.to_string())
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(map_row_to_user(&row))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let query_str = format!("SELECT {} FROM users WHERE username = $1", USER_FIELDS);

        let row = sqlx::query(&query_str)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_row_to_user(&r)))
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query_str = format!("SELECT {} FROM users WHERE id = $1", USER_FIELDS);

        let row = sqlx::query(&query_str)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_row_to_user(&r)))
    }
}
