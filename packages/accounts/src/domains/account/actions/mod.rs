//! Account domain actions - business logic functions
//!
//! Every action takes the account id established at the token boundary;
//! there is no ambient current-user state.

mod feedback;
mod get_identity;
mod update_profile;

pub use feedback::send_feedback;
pub use get_identity::get_identity;
pub use update_profile::update_profile;
