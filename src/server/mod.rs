//! HTTP server for the order desk
//!
//! `ServerBuilder` assembles a [`ServerHost`] from configuration and a table
//! store, then exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod extract;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
