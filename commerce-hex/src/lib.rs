//! # Commerce Hex
//!
//! Application service layer and HTTP adapter for the payment and user services.
//!
//! ## Architecture
//!
//! - `service/` - Application services (orchestrate repository and mapping)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Each service is generic over its repository port, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{PaymentService, UserService};
