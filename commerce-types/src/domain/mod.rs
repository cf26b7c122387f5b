//! Domain models for the payment and user services.

pub mod payment;
pub mod user;

pub use payment::{Payment, PaymentId, PaymentStatus};
pub use user::{Credential, CredentialId, RoleBasedAuthority, User, UserId};
