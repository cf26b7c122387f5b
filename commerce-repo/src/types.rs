//! Shared database row types for SQLite and PostgreSQL.
//!
//! Both schemas use 64-bit integer keys so one row shape decodes from
//! either backend.

use sqlx::FromRow;

use commerce_types::{
    Credential, CredentialId, Payment, PaymentId, PaymentStatus, RepoError, RoleBasedAuthority,
    User, UserId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    pub payment_id: i64,
    pub is_payed: bool,
    pub payment_status: String,
    pub order_id: Option<i64>,
}

/// User row joined with its (optional) credential.
#[derive(FromRow)]
pub struct DbUser {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    pub credential_id: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_based_authority: Option<String>,
    pub is_enabled: Option<bool>,
    pub is_account_non_expired: Option<bool>,
    pub is_account_non_locked: Option<bool>,
    pub is_credentials_non_expired: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Narrows a stored key to the 32-bit identifiers used by the domain.
pub fn parse_key(value: i64) -> Result<i32, RepoError> {
    i32::try_from(value).map_err(|_| RepoError::Database(format!("Key out of range: {}", value)))
}

/// Converts a driver error, reporting unique-constraint violations as conflicts.
pub fn map_db_error(err: sqlx::Error) -> RepoError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepoError::Conflict(db_err.message().to_string());
        }
    }
    RepoError::Database(err.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

impl DbPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let status: PaymentStatus = self.payment_status.parse()?;
        let order_id = self.order_id.map(parse_key).transpose()?;

        Ok(Payment::from_parts(
            PaymentId::new(parse_key(self.payment_id)?),
            self.is_payed,
            status,
            order_id,
        ))
    }
}

impl DbUser {
    /// Convert database row to domain User.
    ///
    /// The credential columns are all NULL when the user has no credential.
    pub fn into_domain(self) -> Result<User, RepoError> {
        let credential = match self.credential_id {
            Some(credential_id) => {
                let role: RoleBasedAuthority = self
                    .role_based_authority
                    .as_deref()
                    .unwrap_or_default()
                    .parse()?;

                Some(Credential {
                    credential_id: Some(CredentialId::new(parse_key(credential_id)?)),
                    username: self.username.unwrap_or_default(),
                    password: self.password.unwrap_or_default(),
                    role_based_authority: role,
                    is_enabled: self.is_enabled.unwrap_or_default(),
                    is_account_non_expired: self.is_account_non_expired.unwrap_or_default(),
                    is_account_non_locked: self.is_account_non_locked.unwrap_or_default(),
                    is_credentials_non_expired: self.is_credentials_non_expired.unwrap_or_default(),
                })
            }
            None => None,
        };

        Ok(User {
            user_id: Some(UserId::new(parse_key(self.user_id)?)),
            first_name: self.first_name,
            last_name: self.last_name,
            image_url: self.image_url,
            email: self.email,
            phone: self.phone,
            credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_row() -> DbUser {
        DbUser {
            user_id: 4,
            first_name: Some("John".into()),
            last_name: None,
            image_url: None,
            email: None,
            phone: None,
            credential_id: None,
            username: None,
            password: None,
            role_based_authority: None,
            is_enabled: None,
            is_account_non_expired: None,
            is_account_non_locked: None,
            is_credentials_non_expired: None,
        }
    }

    #[test]
    fn test_user_row_without_credential() {
        let user = user_row().into_domain().unwrap();
        assert_eq!(user.user_id, Some(UserId::new(4)));
        assert!(user.credential.is_none());
    }

    #[test]
    fn test_user_row_with_credential() {
        let row = DbUser {
            credential_id: Some(9),
            username: Some("johndoe".into()),
            password: Some("pw".into()),
            role_based_authority: Some("ROLE_ADMIN".into()),
            is_enabled: Some(true),
            is_account_non_expired: Some(true),
            is_account_non_locked: Some(false),
            is_credentials_non_expired: Some(true),
            ..user_row()
        };

        let credential = row.into_domain().unwrap().credential.unwrap();

        assert_eq!(credential.credential_id, Some(CredentialId::new(9)));
        assert_eq!(credential.role_based_authority, RoleBasedAuthority::RoleAdmin);
        assert!(!credential.is_account_non_locked);
    }

    #[test]
    fn test_payment_row_with_bad_status() {
        let row = DbPayment {
            payment_id: 1,
            is_payed: false,
            payment_status: "LOST".into(),
            order_id: None,
        };
        assert!(matches!(row.into_domain(), Err(RepoError::Domain(_))));
    }

    #[test]
    fn test_key_out_of_range() {
        assert!(parse_key(i64::MAX).is_err());
        assert_eq!(parse_key(-99).unwrap(), -99);
    }
}
