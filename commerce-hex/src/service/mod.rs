//! Application services.
//!
//! Each service orchestrates one repository port and the mapping layer.
//! Contains NO infrastructure logic - pure orchestration.

mod payment;
mod user;

pub use payment::PaymentService;
pub use user::UserService;
