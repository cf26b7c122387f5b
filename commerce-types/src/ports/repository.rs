//! Repository port traits.
//!
//! One store per entity type, keyed by an integer identifier.
//! Adapters (Postgres, SQLite, in-memory fakes) implement these traits.

use crate::domain::{Payment, PaymentId, User, UserId};
use crate::error::RepoError;

/// Store for payments.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Gets a payment by ID.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Lists all payments.
    async fn find_all(&self) -> Result<Vec<Payment>, RepoError>;

    /// Inserts the payment when it has no ID, otherwise overwrites the stored row.
    ///
    /// Returns the payment as stored, carrying its assigned ID.
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Removes a payment. Removing an unknown ID is not an error.
    async fn delete_by_id(&self, id: PaymentId) -> Result<(), RepoError>;

    /// Removes every payment.
    async fn delete_all(&self) -> Result<(), RepoError>;
}

/// Store for users and the credentials they own.
///
/// A user's credential is written and removed together with the user.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Gets a user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Lists all users.
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Finds the user owning the credential with this exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Inserts the user when it has no ID, otherwise overwrites the stored row.
    ///
    /// Returns the user as stored, carrying its assigned ID and credential ID.
    async fn save(&self, user: User) -> Result<User, RepoError>;

    /// Removes a user and its credential. Removing an unknown ID is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), RepoError>;

    /// Removes every user.
    async fn delete_all(&self) -> Result<(), RepoError>;
}
