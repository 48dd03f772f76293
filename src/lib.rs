//! Client core for the finance API.
//!
//! ARCHITECTURE
//! ============
//! - `storage`: durable key-value adapter with persistent and no-op backends
//! - `state`: observable auth session and the shared `AppContext`
//! - `net`: origin detection, bearer decoration, the request pipeline
//! - `api`: typed service clients per REST resource
//! - `routing`: route table, navigation seam, auth guard
//!
//! Build an [`AppContext`](state::AppContext) once and pass it around; every
//! call made through `ctx.api` resolves the origin on first use and carries
//! the current session token.

pub mod api;
pub mod config;
pub mod error;
pub mod net;
pub mod routing;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use config::ApiConfig;
pub use error::ApiError;
pub use state::AppContext;
