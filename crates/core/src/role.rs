use serde::{Deserialize, Serialize};

/// Role granted by the server to the current identity.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Anonymous,
    User,
    PowerUser,
    Admin,
}

impl Role {
    /// Map the wire `role` string.
    ///
    /// An absent/empty role means anonymous; unknown non-empty roles are
    /// treated as plain users rather than rejected.
    pub fn from_wire(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            "power_user" => Role::PowerUser,
            "" => Role::Anonymous,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::PowerUser => "power_user",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user capability flags scoping a power user's access to admin sections.
///
/// Stored flags are meaningful only for power users; [`Capabilities::effective`]
/// applies the role overrides.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub view_board: bool,
    pub view_nodes: bool,
    pub review_requests: bool,
}

impl Capabilities {
    pub const ALL: Self = Self {
        view_board: true,
        view_nodes: true,
        review_requests: true,
    };

    pub const NONE: Self = Self {
        view_board: false,
        view_nodes: false,
        review_requests: false,
    };

    /// Capabilities after applying role overrides: admins hold every
    /// capability regardless of stored flags, plain/anonymous users none.
    pub fn effective(self, role: Role) -> Self {
        match role {
            Role::Admin => Self::ALL,
            Role::PowerUser => self,
            Role::User | Role::Anonymous => Self::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roles_map_exactly() {
        assert_eq!(Role::from_wire("admin"), Role::Admin);
        assert_eq!(Role::from_wire("power_user"), Role::PowerUser);
        assert_eq!(Role::from_wire("user"), Role::User);
        assert_eq!(Role::from_wire(""), Role::Anonymous);
    }

    #[test]
    fn unknown_wire_role_degrades_to_user() {
        assert_eq!(Role::from_wire("auditor"), Role::User);
    }

    #[test]
    fn admin_overrides_stored_capabilities() {
        assert_eq!(Capabilities::NONE.effective(Role::Admin), Capabilities::ALL);
    }

    #[test]
    fn power_user_keeps_stored_capabilities() {
        let caps = Capabilities {
            view_nodes: true,
            ..Capabilities::NONE
        };
        assert_eq!(caps.effective(Role::PowerUser), caps);
    }

    #[test]
    fn plain_and_anonymous_users_hold_no_capabilities() {
        assert_eq!(Capabilities::ALL.effective(Role::User), Capabilities::NONE);
        assert_eq!(Capabilities::ALL.effective(Role::Anonymous), Capabilities::NONE);
    }
}
