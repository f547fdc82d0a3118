//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProjectRepository` - Project documents in a JSONB column
//! - `connect` / `run_migrations` - Pool setup used at startup

mod pool;
mod project_repository;

pub use pool::{connect, run_migrations};
pub use project_repository::PostgresProjectRepository;
