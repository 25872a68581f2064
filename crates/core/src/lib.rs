//! `gatekey-core` — domain foundation for the auth service.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! the user model, the error taxonomy, and registration field validation.

pub mod error;
pub mod user;
pub mod validate;

pub use error::{AuthError, AuthResult};
pub use user::{NewUser, Role, UnknownRole, User, UserId};
pub use validate::{ValidationError, validate_credentials, validate_email, validate_name};
