//! Typed HTTP API client for the Foyer frontend.
//!
//! Wraps [`reqwest`] with the frontend's session contract: a bearer token is
//! read from the credential store and attached to every outgoing call, a
//! missing token on a protected path raises a login notification plus a
//! navigation intent, and failed responses are normalized into
//! [`ClientError`] alongside a user-visible notification.
//!
//! All four verbs (`get`, `post`, `put`, `delete`) run through one dispatch
//! path, so interception behavior is identical regardless of method.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ui;

pub use auth::{MemoryTokenStore, TokenStore};
pub use client::{ApiClient, ApiClientBuilder, Envelope, RequestOverrides};
pub use config::ClientConfig;
pub use error::ClientError;
pub use ui::{Navigation, UiSink};
