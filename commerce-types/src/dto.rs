//! Data Transfer Objects (DTOs) exchanged with callers.
//!
//! Field names serialize in camelCase; the nested order and credential are
//! carried under `order` and `credential`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{CredentialId, PaymentId, PaymentStatus, RoleBasedAuthority, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Payment as seen by callers of the payment service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_payed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// Order being paid; only `order_id` is kept by the payment service.
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub order_dto: Option<OrderDto>,
}

/// Order reference owned by the order service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i32>,
    #[serde(
        default,
        with = "order_date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fee: Option<f64>,
}

impl OrderDto {
    /// An order reference carrying only its identifier.
    pub fn reference(order_id: i32) -> Self {
        Self {
            order_id: Some(order_id),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// User as seen by callers of the user service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "credential", skip_serializing_if = "Option::is_none")]
    pub credential_dto: Option<CredentialDto>,
}

/// Credential nested inside a [`UserDto`].
///
/// Account-state flags default to `true` and the role to `ROLE_USER` when
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<CredentialId>,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_based_authority: Option<RoleBasedAuthority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_account_non_expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_account_non_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_credentials_non_expired: Option<bool>,
}

impl CredentialDto {
    /// A credential with only the login pair set.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential_id: None,
            username: username.into(),
            password: password.into(),
            role_based_authority: None,
            is_enabled: None,
            is_account_non_expired: None,
            is_account_non_locked: None,
            is_credentials_non_expired: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// List envelope returned by the collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    pub collection: Vec<T>,
}

impl<T> From<Vec<T>> for CollectionResponse<T> {
    fn from(collection: Vec<T>) -> Self {
        Self { collection }
    }
}

/// `dd-MM-yyyy__HH:mm:ss:SSSSSS`, the order service's date format.
pub mod order_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y__%H:%M:%S:%6f";

    pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
