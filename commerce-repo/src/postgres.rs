//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use commerce_types::{
    Payment, PaymentId, PaymentRepository, RepoError, User, UserId, UserRepository,
};

use crate::types::{DbPayment, DbUser, map_db_error, parse_key};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL connection shared by the payment and user stores.
#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a schema file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Creates all tables.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_users_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository and its tables.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    /// Store for payments on this connection.
    pub fn payments(&self) -> PgPaymentRepo {
        PgPaymentRepo {
            pool: self.pool.clone(),
        }
    }

    /// Store for users on this connection.
    pub fn users(&self) -> PgUserRepo {
        PgUserRepo {
            pool: self.pool.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store for payments.
#[derive(Clone)]
pub struct PgPaymentRepo {
    pool: PgPool,
}

#[async_trait]
impl PaymentRepository for PgPaymentRepo {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT payment_id, is_payed, payment_status, order_id FROM payments WHERE payment_id = $1"#,
        )
        .bind(i64::from(id.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<DbPayment> = sqlx::query_as(
            r#"SELECT payment_id, is_payed, payment_status, order_id FROM payments ORDER BY payment_id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        let order_id = payment.order_id.map(i64::from);

        match payment.payment_id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"INSERT INTO payments (is_payed, payment_status, order_id) VALUES ($1, $2, $3)
                       RETURNING payment_id"#,
                )
                .bind(payment.is_payed)
                .bind(payment.payment_status.as_ref())
                .bind(order_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

                let id = PaymentId::new(parse_key(id)?);
                tracing::debug!(payment_id = %id, "payment inserted");
                Ok(payment.with_id(id))
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE payments SET is_payed = $1, payment_status = $2, order_id = $3 WHERE payment_id = $4"#,
                )
                .bind(payment.is_payed)
                .bind(payment.payment_status.as_ref())
                .bind(order_id)
                .bind(i64::from(id.value()))
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(RepoError::NotFound);
                }

                tracing::debug!(payment_id = %id, "payment updated");
                Ok(payment)
            }
        }
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM payments WHERE payment_id = $1"#)
            .bind(i64::from(id.value()))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM payments"#)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store for users and their credentials.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT u.user_id, u.first_name, u.last_name, u.image_url, u.email, u.phone,
                      c.credential_id, c.username, c.password, c.role_based_authority,
                      c.is_enabled, c.is_account_non_expired, c.is_account_non_locked, c.is_credentials_non_expired
               FROM users u LEFT JOIN credentials c ON c.user_id = u.user_id
               WHERE u.user_id = $1"#,
        )
        .bind(i64::from(id.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(DbUser::into_domain).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let rows: Vec<DbUser> = sqlx::query_as(
            r#"SELECT u.user_id, u.first_name, u.last_name, u.image_url, u.email, u.phone,
                      c.credential_id, c.username, c.password, c.role_based_authority,
                      c.is_enabled, c.is_account_non_expired, c.is_account_non_locked, c.is_credentials_non_expired
               FROM users u LEFT JOIN credentials c ON c.user_id = u.user_id
               ORDER BY u.user_id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(DbUser::into_domain).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT u.user_id, u.first_name, u.last_name, u.image_url, u.email, u.phone,
                      c.credential_id, c.username, c.password, c.role_based_authority,
                      c.is_enabled, c.is_account_non_expired, c.is_account_non_locked, c.is_credentials_non_expired
               FROM users u INNER JOIN credentials c ON c.user_id = u.user_id
               WHERE c.username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(DbUser::into_domain).transpose()
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(map_db_error)?;

        let user_id: i64 = match user.user_id {
            None => sqlx::query_scalar(
                r#"INSERT INTO users (first_name, last_name, image_url, email, phone)
                   VALUES ($1, $2, $3, $4, $5) RETURNING user_id"#,
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.image_url)
            .bind(&user.email)
            .bind(&user.phone)
            .fetch_one(&mut *db_tx)
            .await
            .map_err(map_db_error)?,
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE users SET first_name = $1, last_name = $2, image_url = $3, email = $4, phone = $5
                       WHERE user_id = $6"#,
                )
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.image_url)
                .bind(&user.email)
                .bind(&user.phone)
                .bind(i64::from(id.value()))
                .execute(&mut *db_tx)
                .await
                .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(RepoError::NotFound);
                }

                i64::from(id.value())
            }
        };

        if let Some(credential) = &user.credential {
            sqlx::query(
                r#"INSERT INTO credentials (user_id, username, password, role_based_authority,
                       is_enabled, is_account_non_expired, is_account_non_locked, is_credentials_non_expired)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                   ON CONFLICT (user_id) DO UPDATE SET
                       username = EXCLUDED.username,
                       password = EXCLUDED.password,
                       role_based_authority = EXCLUDED.role_based_authority,
                       is_enabled = EXCLUDED.is_enabled,
                       is_account_non_expired = EXCLUDED.is_account_non_expired,
                       is_account_non_locked = EXCLUDED.is_account_non_locked,
                       is_credentials_non_expired = EXCLUDED.is_credentials_non_expired"#,
            )
            .bind(user_id)
            .bind(&credential.username)
            .bind(&credential.password)
            .bind(credential.role_based_authority.as_ref())
            .bind(credential.is_enabled)
            .bind(credential.is_account_non_expired)
            .bind(credential.is_account_non_locked)
            .bind(credential.is_credentials_non_expired)
            .execute(&mut *db_tx)
            .await
            .map_err(map_db_error)?;
        }

        db_tx.commit().await.map_err(map_db_error)?;

        let id = UserId::new(parse_key(user_id)?);
        tracing::debug!(user_id = %id, "user saved");

        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), RepoError> {
        // Credentials go with the user through ON DELETE CASCADE.
        sqlx::query(r#"DELETE FROM users WHERE user_id = $1"#)
            .bind(i64::from(id.value()))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepoError> {
        sqlx::query(r#"TRUNCATE credentials, users"#)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
