//! HTTP adapter for issue endpoints.
//!
//! All four verbs share `/api/issues/:project`; inputs come from the query
//! string and every response is a JSON body with status 200.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::IssuesAppState;
pub use routes::issues_router;
