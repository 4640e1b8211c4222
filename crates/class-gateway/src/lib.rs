//! Client library for the class management backend.
//!
//! This crate wraps the four upstream endpoints a teacher-outreach run talks to:
//!
//! - Exchanging the application identity for a short-lived access token
//! - Listing a teacher's classes, one page at a time
//! - Fetching the student roster of a class
//! - Sending a broadcast message to a set of students
//!
//! Callers assemble query parameters and headers themselves (usually by
//! merging teacher configuration over [`GatewayConfig`] defaults); the client
//! only performs the request and decodes the response.
//!
//! # Example
//!
//! ```no_run
//! use class_gateway::{GatewayClient, GatewayConfig};
//!
//! # async fn example() -> Result<(), class_gateway::GatewayError> {
//! let config = GatewayConfig::default();
//! let client = GatewayClient::new(config)?;
//!
//! let token = client.acquire_token().await?;
//! println!("token prefix: {}", class_gateway::token_prefix(&token));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use types::*;

/// Status code the backend uses to acknowledge a successful call.
pub const SUCCESS_STATUS: i64 = 100_000;

/// First few characters of an access token, safe to log.
pub fn token_prefix(token: &str) -> String {
    token.chars().take(10).collect()
}
