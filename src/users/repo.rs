use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::users::dto::UserUpdate;
use crate::users::model::{NewUser, User};

/// Typed lookup condition for single-user queries.
#[derive(Debug, Clone)]
pub enum UserFilter {
    ById(Uuid),
    ByEmail(String),
}

/// Persistence seam for user records. One statement per call; no retries, no
/// transactions.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn save(&self, user: &NewUser) -> Result<(), RepoError>;
    async fn get_user(&self, filter: &UserFilter) -> Result<User, RepoError>;
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;
    async fn update(&self, id: Uuid, changes: &UserUpdate) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Postgres-backed repository.
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn save(&self, user: &NewUser) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, salt, role)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.role)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get_user(&self, filter: &UserFilter) -> Result<User, RepoError> {
        let query = match filter {
            UserFilter::ById(id) => sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password_hash, salt, role, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(*id),
            UserFilter::ByEmail(email) => sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password_hash, salt, role, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email.as_str()),
        };

        query
            .fetch_optional(&self.db)
            .await?
            .ok_or(RepoError::NotFound)
    }

    // TODO: paginate once the user table grows (limit/offset params).
    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, salt, role, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn update(&self, id: Uuid, changes: &UserUpdate) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE($2, email)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
