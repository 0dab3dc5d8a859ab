//! users-api: HTTP CRUD service over the `users` table
//!
//! Exposes list/get/create/update/delete under `/api/users`, backed by a
//! shared PostgreSQL connection pool. Handlers are stateless; all state
//! lives in the database.

pub mod db;
pub mod http;

pub use http::{build_router, run_server, AppState, ServerConfig};
