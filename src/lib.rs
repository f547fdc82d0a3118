//! Issue Tracker - Project-scoped issue tracking REST API
//!
//! Clients create, filter, update, and delete issues embedded in named
//! projects. The crate follows a ports-and-adapters layout: the domain and
//! application layers know only the `ProjectRepository` port, with memory and
//! PostgreSQL adapters behind it and an axum adapter in front.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
