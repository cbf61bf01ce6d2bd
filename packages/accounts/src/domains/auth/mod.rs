//! Auth domain - phone-based authentication with one-time codes
//!
//! Responsibilities:
//! - Verification code lifecycle (issue, deliver, consume exactly once)
//! - Registration and login protocols built on it
//! - Stateless session tokens (JWT)

pub mod actions;
pub mod codes;
pub mod errors;
pub mod jwt;

pub use codes::{CodeService, RandomCodeGenerator, CODE_TTL};
pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
