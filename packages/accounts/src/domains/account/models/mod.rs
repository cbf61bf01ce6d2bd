pub mod account;
pub mod role;

pub use account::{Account, InsertOutcome, ProfilePatch, DEFAULT_AVATAR_URL};
pub use role::{Permission, Role, DEFAULT_ROLE_IDS};
