//! `meterdesk-core` — pure domain primitives of the console access layer.
//!
//! This crate is intentionally decoupled from HTTP and storage: error
//! normalization, roles/capabilities, and the session snapshot are all
//! deterministic values with no IO.

pub mod error;
pub mod role;
pub mod session;

pub use error::{ApiError, normalize};
pub use role::{Capabilities, Role};
pub use session::Session;
