use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{NewUser, User};

/// Typed record access used by request handlers.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;
}

/// Raw administrative SQL. Only the gated admin routes and the admin
/// binaries hold one of these.
#[async_trait]
pub trait AdminMigrator: Send + Sync {
    async fn apply(&self, statement: &str) -> Result<(), DatabaseError>;
}

// Advisory lock key shared by every administrative statement ("RECRUIT" in ASCII)
const ADMIN_MIGRATION_LOCK: i64 = 0x5245_4352_5549_54;

/// Postgres implementation of both gateways over one pool
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistenceGateway for PgGateway {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, "passwordHash" AS password_hash
               FROM "User"
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let id = Uuid::new_v4().to_string();

        let created = sqlx::query_as::<_, User>(
            r#"INSERT INTO "User" (id, name, email, "passwordHash")
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, "passwordHash" AS password_hash"#,
        )
        .bind(&id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created user {}", created.id);
        Ok(created)
    }
}

#[async_trait]
impl AdminMigrator for PgGateway {
    async fn apply(&self, statement: &str) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent admin statements; released at commit or rollback
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ADMIN_MIGRATION_LOCK)
            .execute(&mut *tx)
            .await?;

        sqlx::query(statement).execute(&mut *tx).await?;
        tx.commit().await?;

        info!("Applied administrative statement: {}", statement);
        Ok(())
    }
}
