//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST endpoints under `/api/issues`
//! - `memory` - Process-local project store
//! - `postgres` - JSONB document store

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryProjectRepository;
pub use postgres::PostgresProjectRepository;
