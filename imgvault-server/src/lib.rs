//! imgvault-server: HTTP surface over a connected image driver
//!
//! Exposes upload, fetch, delete, and list endpoints backed by whatever
//! driver the registry connected.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{run_server, ServerConfig};
pub use state::AppState;
