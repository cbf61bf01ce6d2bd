//! Auth domain actions - business logic functions
//!
//! Actions are async functions taking explicit identifiers plus the
//! dependency container; token validation happens at the boundary via
//! `authenticate`, never through ambient state.

mod authenticate;
mod delete_account;
mod login;
mod logout;
mod register;
mod send_code;

pub use authenticate::authenticate;
pub use delete_account::delete_account;
pub use login::login;
pub use logout::logout;
pub use register::register;
pub use send_code::send_code;
