//! Account domain - profile management and the role/permission model
//!
//! Responsibilities:
//! - Account records and sparse profile updates
//! - Role and permission lookups
//! - Resolution of an account's effective permission set

pub mod actions;
pub mod models;
pub mod resolver;

pub use models::{Account, Permission, ProfilePatch, Role};
pub use resolver::AccountIdentity;
