//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (one-off maintenance commands)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
