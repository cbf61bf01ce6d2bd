//! Kernel module - infrastructure collaborators and dependency wiring.

pub mod deps;
pub mod memory;
pub mod pg_store;
pub mod redis_cache;
pub mod test_dependencies;
pub mod traits;

pub use deps::AccountDeps;
pub use memory::MemoryCodeCache;
pub use pg_store::PgAccountStore;
pub use redis_cache::RedisCodeCache;
pub use test_dependencies::TestDependencies;
pub use traits::*;
