// Common types and utilities shared across the crate

pub mod validate;

pub use validate::{is_valid_email, is_valid_phone, EMAIL_UNBOUND};
