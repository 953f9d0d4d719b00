//! `meterdesk-auth` — session state and navigation authorization.
//!
//! Two pieces live here: the [`SessionStore`], the single owner of the
//! process-wide [`meterdesk_core::Session`], and the route guard, which
//! turns every navigation attempt into an allow/redirect decision.

pub mod guard;
pub mod routes;
pub mod store;

pub use guard::{NavDecision, RouteGuard, decide};
pub use store::SessionStore;
