//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProjectRepository` - Document store for projects and their embedded issues

mod project_repository;

pub use project_repository::ProjectRepository;
