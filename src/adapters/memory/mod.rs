//! In-memory adapters - process-local implementations of storage ports.

mod project_repository;

pub use project_repository::InMemoryProjectRepository;
