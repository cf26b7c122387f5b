//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use commerce_types::{
    Payment, PaymentId, PaymentRepository, RepoError, User, UserId, UserRepository,
};

use crate::types::{DbPayment, DbUser, map_db_error, parse_key};

const PAYMENTS_DDL: &str = include_str!("../migrations/0001_create_payments.sql");
const USERS_DDL: &str = include_str!("../migrations/0002_create_users.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite connection shared by the payment and user stores.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a schema file, splitting by semicolons.
async fn execute_schema(pool: &SqlitePool, sql: &str) -> Result<(), sqlx::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt).execute(pool).await?;
        }
    }
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository and its tables.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives only as long as its connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        execute_schema(&self.pool, PAYMENTS_DDL)
            .await
            .map_err(map_db_error)?;
        execute_schema(&self.pool, USERS_DDL)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    /// Store for payments on this connection.
    pub fn payments(&self) -> SqlitePaymentRepo {
        SqlitePaymentRepo {
            pool: self.pool.clone(),
        }
    }

    /// Store for users on this connection.
    pub fn users(&self) -> SqliteUserRepo {
        SqliteUserRepo {
            pool: self.pool.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store for payments.
#[derive(Clone)]
pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT payment_id, is_payed, payment_status, order_id FROM payments WHERE payment_id = ?"#,
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
                let result = sqlx::query(
                    r#"INSERT INTO payments (is_payed, payment_status, order_id) VALUES (?, ?, ?)"#,
                )
                .bind(payment.is_payed)
                .bind(payment.payment_status.as_ref())
                .bind(order_id)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

                let id = PaymentId::new(parse_key(result.last_insert_rowid())?);
                tracing::debug!(payment_id = %id, "payment inserted");
                Ok(payment.with_id(id))
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE payments SET is_payed = ?, payment_status = ?, order_id = ? WHERE payment_id = ?"#,
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
        sqlx::query(r#"DELETE FROM payments WHERE payment_id = ?"#)
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

/// SQLite store for users and their credentials.
#[derive(Clone)]
pub struct SqliteUserRepo {
    pool: SqlitePool,
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            r#"SELECT u.user_id, u.first_name, u.last_name, u.image_url, u.email, u.phone,
                      c.credential_id, c.username, c.password, c.role_based_authority,
                      c.is_enabled, c.is_account_non_expired, c.is_account_non_locked, c.is_credentials_non_expired
               FROM users u LEFT JOIN credentials c ON c.user_id = u.user_id
               WHERE u.user_id = ?"#,
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
               WHERE c.username = ?"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(DbUser::into_domain).transpose()
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(map_db_error)?;

        let user_id = match user.user_id {
            None => {
                let result = sqlx::query(
                    r#"INSERT INTO users (first_name, last_name, image_url, email, phone) VALUES (?, ?, ?, ?, ?)"#,
                )
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.image_url)
                .bind(&user.email)
                .bind(&user.phone)
                .execute(&mut *db_tx)
                .await
                .map_err(map_db_error)?;

                result.last_insert_rowid()
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE users SET first_name = ?, last_name = ?, image_url = ?, email = ?, phone = ?
                       WHERE user_id = ?"#,
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
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                   ON CONFLICT(user_id) DO UPDATE SET
                       username = excluded.username,
                       password = excluded.password,
                       role_based_authority = excluded.role_based_authority,
                       is_enabled = excluded.is_enabled,
                       is_account_non_expired = excluded.is_account_non_expired,
                       is_account_non_locked = excluded.is_account_non_locked,
                       is_credentials_non_expired = excluded.is_credentials_non_expired"#,
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
        let mut db_tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(r#"DELETE FROM credentials WHERE user_id = ?"#)
            .bind(i64::from(id.value()))
            .execute(&mut *db_tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(r#"DELETE FROM users WHERE user_id = ?"#)
            .bind(i64::from(id.value()))
            .execute(&mut *db_tx)
            .await
            .map_err(map_db_error)?;

        db_tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepoError> {
        let mut db_tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(r#"DELETE FROM credentials"#)
            .execute(&mut *db_tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(r#"DELETE FROM users"#)
            .execute(&mut *db_tx)
            .await
            .map_err(map_db_error)?;

        db_tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
