use super::{models::User, repository::UserDao};
use crate::{
    dao::{
        models::{Page, Pageable},
        repository::GenericDao,
    },
    errors::ServiceError,
    resource::models::{Entity, ResourceId},
    setup::ServiceConfig,
};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

const CREATE_USERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS "users" (
    "id" BIGSERIAL PRIMARY KEY,
    "created_at" TIMESTAMPTZ NOT NULL,
    "updated_at" TIMESTAMPTZ NOT NULL,
    "login" TEXT NOT NULL UNIQUE,
    "email" TEXT,
    "first_name" TEXT,
    "last_name" TEXT,
    "password" TEXT NOT NULL
)"#;

fn log_sqlx_error(e: sqlx::Error, method: &'static str) -> ServiceError {
    tracing::error!(
        error = e.to_string(),
        method,
        "PostgresUserDao sqlx error"
    );

    ServiceError::SqlxError
}

fn map_write_error(e: sqlx::Error, method: &'static str) -> ServiceError {
    match e {
        sqlx::Error::RowNotFound => ServiceError::EntityNotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            ServiceError::EntityAlreadyExists
        }
        e => log_sqlx_error(e, method),
    }
}

#[derive(Clone)]
pub struct PostgresUserDao {
    pool: Pool<Postgres>,
}

impl PostgresUserDao {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let pool = PgPoolOptions::new()
            .connect(&config.database_url)
            .await
            .map_err(|e| log_sqlx_error(e, "connect"))?;

        Ok(Self::new(pool))
    }

    pub async fn init_schema(&self) -> Result<(), ServiceError> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "init_schema"))?;

        Ok(())
    }
}

#[async_trait]
impl GenericDao<User, ResourceId> for PostgresUserDao {
    async fn insert(&self, user: User) -> Result<User, ServiceError> {
        if user.is_persisted() {
            return Err(ServiceError::EntityAlreadyPersisted);
        }

        sqlx::query_as(
            r#"INSERT INTO "users"
            ("created_at", "updated_at", "login", "email", "first_name", "last_name", "password")
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *"#,
        )
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.login)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "insert"))
    }

    async fn update(&self, user: User) -> Result<User, ServiceError> {
        let id = user.id.ok_or(ServiceError::EntityNotPersisted)?;

        sqlx::query_as(
            r#"UPDATE "users" SET
            "created_at" = $2, "updated_at" = $3, "login" = $4, "email" = $5,
            "first_name" = $6, "last_name" = $7, "password" = $8
            WHERE "id" = $1
            RETURNING *"#,
        )
        .bind(id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.login)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<User>, ServiceError> {
        sqlx::query_as(r#"SELECT * FROM "users" WHERE "id" = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "find_by_id"))
    }

    async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
        sqlx::query_as(r#"SELECT * FROM "users" ORDER BY "id""#)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "find_all"))
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<User>, ServiceError> {
        let limit = i64::try_from(pageable.size).unwrap_or(i64::MAX);
        let offset = i64::try_from(pageable.offset()).unwrap_or(i64::MAX);

        let content = sqlx::query_as(r#"SELECT * FROM "users" ORDER BY "id" LIMIT $1 OFFSET $2"#)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "find_page"))?;

        Ok(Page {
            content,
            number: pageable.page,
            size: pageable.size,
            total_elements: self.count().await?,
        })
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let n: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "users""#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "count"))?;

        Ok(n.max(0) as u64)
    }

    async fn delete_by_id(&self, id: ResourceId) -> Result<bool, ServiceError> {
        let res = sqlx::query(r#"DELETE FROM "users" WHERE "id" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "delete_by_id"))?;

        Ok(res.rows_affected() != 0)
    }
}

#[async_trait]
impl UserDao for PostgresUserDao {
    async fn find_all_by_login(&self, login: &str) -> Result<Vec<User>, ServiceError> {
        sqlx::query_as(r#"SELECT * FROM "users" WHERE "login" = $1 ORDER BY "id""#)
            .bind(login)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_sqlx_error(e, "find_all_by_login"))
    }
}
