//! Admin permission actions declared by the path plugin.
//!
//! Pure configuration data. The host's permission registrar consumes it at
//! startup.

use serde::Serialize;

/// Owner recorded on every action this crate declares.
pub const PERMISSION_OWNER: &str = "path";

/// One admin capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionAction {
    pub section: &'static str,
    pub display_name: &'static str,
    pub uid: &'static str,
    pub owner: &'static str,
}

pub const PERMISSION_ACTIONS: &[PermissionAction] = &[
    PermissionAction {
        section: "plugins",
        display_name: "Access the URL alias list",
        uid: "settings.list",
        owner: PERMISSION_OWNER,
    },
    PermissionAction {
        section: "plugins",
        display_name: "Access the URL alias patterns",
        uid: "settings.patterns",
        owner: PERMISSION_OWNER,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_uids_are_unique() {
        let mut uids: Vec<&str> = PERMISSION_ACTIONS.iter().map(|a| a.uid).collect();
        uids.sort_unstable();
        uids.dedup();
        assert_eq!(uids.len(), PERMISSION_ACTIONS.len());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PERMISSION_ACTIONS[0]).unwrap();
        assert_eq!(json["displayName"], "Access the URL alias list");
        assert_eq!(json["owner"], "path");
    }
}
