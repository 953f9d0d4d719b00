//! Route table of the console frontend.
//!
//! Paths are plain constants; the guard's rules reference them by name so a
//! new admin section cannot silently fall through to the wrong branch.

pub const ROOT: &str = "/";

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const RESET_PASSWORD: &str = "/reset-password";

pub const USER_BALANCE: &str = "/user/balance";
pub const USER_PROFILE: &str = "/user/profile";
pub const USER_USAGE: &str = "/user/usage";
pub const USER_ACCOUNTS: &str = "/user/accounts";
pub const CHANGE_PASSWORD: &str = "/user/change-password";

pub const ADMIN_PREFIX: &str = "/admin";
pub const ADMIN_BOARD: &str = "/admin/board";
pub const ADMIN_NODES: &str = "/admin/nodes";
pub const ADMIN_REQUESTS: &str = "/admin/requests";

/// Screens reachable without an authenticated session.
pub const PUBLIC: [&str; 4] = [LOGIN, REGISTER, FORGOT_PASSWORD, RESET_PASSWORD];

pub fn is_public(path: &str) -> bool {
    PUBLIC.contains(&path)
}
