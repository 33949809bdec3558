use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::model::{now_seconds, NewUser, User, UserChanges};
use crate::error::{Error, Result};

/// Persistence of user records. Soft-deleted rows behave as absent.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn get(&self, id: &str) -> Result<User>;
    async fn get_by_email(&self, email: &str) -> Result<User>;
    async fn update(&self, user: UserChanges) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let now = now_seconds();
        let id = user
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password, address, created_time, updated_time)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, email, password, address, created_time, updated_time
            "#,
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.address)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        debug!(user_id = %user.id, "user row inserted");
        Ok(user)
    }

    async fn get(&self, id: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, address, created_time, updated_time
              FROM users
             WHERE id = $1 AND deleted_time IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, address, created_time, updated_time
              FROM users
             WHERE email = $1 AND deleted_time IS NULL
             ORDER BY created_time ASC
             LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    async fn update(&self, user: UserChanges) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET email = $1, password = $2, address = $3, updated_time = $4
             WHERE id = $5 AND deleted_time IS NULL
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.address)
        .bind(now_seconds())
        .bind(&user.id)
        .execute(&self.db)
        .await?;

        if res.rows_affected() != 1 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET deleted_time = $1
             WHERE id = $2 AND deleted_time IS NULL
            "#,
        )
        .bind(now_seconds())
        .bind(id)
        .execute(&self.db)
        .await?;

        if res.rows_affected() != 1 {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}
