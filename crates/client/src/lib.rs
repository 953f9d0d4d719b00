//! `meterdesk-client`
//!
//! **Responsibility:** typed HTTP access to the console API.
//!
//! This crate is a **thin shell** around the remote console: wire DTOs plus
//! one-line request wrappers over the [`ApiClient`] pipeline. The pipeline
//! owns credential transport (login-session cookies or an out-of-band admin
//! bearer token) and the CSRF refresh-and-retry protocol for state-changing
//! calls.

pub mod endpoints;
pub mod pipeline;
pub mod types;

pub use meterdesk_core::ApiError;
pub use pipeline::{ApiClient, AuthMode};
