//! Payment domain model.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Store-assigned identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i32);

impl PaymentId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for PaymentId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Progress of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl AsRef<str> for PaymentStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment status: {}",
                other
            ))),
        }
    }
}

/// A payment against an order owned by the order service.
///
/// `payment_id` is `None` until the payment has been stored. The order is
/// held only as a scalar reference and is not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: Option<PaymentId>,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
    pub order_id: Option<i32>,
}

impl Payment {
    /// Creates a payment that has not been stored yet.
    pub fn new(is_payed: bool, payment_status: PaymentStatus, order_id: Option<i32>) -> Self {
        Self {
            payment_id: None,
            is_payed,
            payment_status,
            order_id,
        }
    }

    /// Creates a payment with all fields specified (for database reconstruction).
    pub fn from_parts(
        payment_id: PaymentId,
        is_payed: bool,
        payment_status: PaymentStatus,
        order_id: Option<i32>,
    ) -> Self {
        Self {
            payment_id: Some(payment_id),
            is_payed,
            payment_status,
            order_id,
        }
    }

    /// Returns a copy carrying the given identifier.
    pub fn with_id(mut self, payment_id: PaymentId) -> Self {
        self.payment_id = Some(payment_id);
        self
    }
}
