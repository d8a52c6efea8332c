//! HTTP server module.
//!
//! Serves the router over plain HTTP. TLS is left to a reverse proxy.
//! Shuts down gracefully on SIGTERM/SIGINT, draining in-flight requests.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
