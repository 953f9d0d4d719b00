//! Tracing/logging setup shared by the meterdesk binaries.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset. The meterdesk crates stay at
/// debug so swallowed-error warnings from the request pipeline and the route
/// guard remain visible without flooding the output with dependency noise.
const DEFAULT_FILTER: &str = "info,meterdesk_client=debug,meterdesk_auth=debug";

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Initialize with an explicit fallback filter. `RUST_LOG` still wins when
/// set.
pub fn init_with_default(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
