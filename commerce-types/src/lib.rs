//! # Commerce Types
//!
//! Domain types and port traits for the payment and user services.
//! This crate has ZERO external IO dependencies - only data structures,
//! conversions, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Persistence entities (Payment, User, Credential)
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `mapper/` - Entity <-> DTO conversions
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Credential, CredentialId, Payment, PaymentId, PaymentStatus, RoleBasedAuthority, User, UserId,
};
pub use dto::*;
pub use error::{AppError, DomainError, NotFoundError, RepoError};
pub use ports::{PaymentRepository, UserRepository};
