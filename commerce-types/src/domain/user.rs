//! User domain model and the credential it owns.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Store-assigned identifier for a User.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Store-assigned identifier for a Credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(i32);

impl CredentialId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authority granted to a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleBasedAuthority {
    #[default]
    RoleUser,
    RoleAdmin,
}

impl AsRef<str> for RoleBasedAuthority {
    fn as_ref(&self) -> &str {
        match self {
            Self::RoleUser => "ROLE_USER",
            Self::RoleAdmin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for RoleBasedAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for RoleBasedAuthority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" => Ok(Self::RoleUser),
            "ROLE_ADMIN" => Ok(Self::RoleAdmin),
            other => Err(DomainError::ValidationError(format!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}

/// Login credential owned by exactly one [`User`].
///
/// There is no pointer back to the owning user; the reverse direction is
/// answered by looking the user up by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub credential_id: Option<CredentialId>,
    pub username: String,
    pub password: String,
    pub role_based_authority: RoleBasedAuthority,
    pub is_enabled: bool,
    pub is_account_non_expired: bool,
    pub is_account_non_locked: bool,
    pub is_credentials_non_expired: bool,
}

impl Credential {
    /// Creates an active credential with the default role.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential_id: None,
            username: username.into(),
            password: password.into(),
            role_based_authority: RoleBasedAuthority::default(),
            is_enabled: true,
            is_account_non_expired: true,
            is_account_non_locked: true,
            is_credentials_non_expired: true,
        }
    }
}

/// A registered user together with the credential it owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Option<UserId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub credential: Option<Credential>,
}

impl User {
    /// Returns a copy carrying the given identifier.
    pub fn with_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Username of the owned credential, if any.
    pub fn username(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credential_is_active() {
        let credential = Credential::new("johndoe", "password123");
        assert!(credential.is_enabled);
        assert!(credential.is_account_non_expired);
        assert!(credential.is_account_non_locked);
        assert!(credential.is_credentials_non_expired);
        assert_eq!(credential.role_based_authority, RoleBasedAuthority::RoleUser);
        assert!(credential.credential_id.is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(
            "ROLE_ADMIN".parse::<RoleBasedAuthority>().unwrap(),
            RoleBasedAuthority::RoleAdmin
        );
        assert!("ROLE_ROOT".parse::<RoleBasedAuthority>().is_err());
    }

    #[test]
    fn test_username_without_credential() {
        let user = User {
            first_name: Some("John".into()),
            ..Default::default()
        };
        assert!(user.username().is_none());
    }
}
