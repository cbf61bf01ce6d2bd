// Tidings Accounts - API Core
//
// This crate provides the account backend for the Tidings content app:
// phone-based registration and login via one-time verification codes,
// stateless session tokens, profile management, and role/permission
// resolution. Transport (HTTP) and delivery vendors live outside this
// crate, behind the kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
