//! Database layer - connection pool and the user repository
//!
//! # Design Principles
//!
//! - One shared connection pool, injected through `AppState` - no globals
//! - Every statement is parameterized
//! - Store failures surface as explicit `DbError` values, never panics

pub mod pool;
pub mod users;

pub use pool::create_pool;
pub use users::{DbError, User, UserRepo};
