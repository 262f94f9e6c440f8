//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g.
//! `"pth-a3f8b2c1"`.

/// Path records.
pub const PREFIX_PATH: &str = "pth";

/// Content entities.
pub const PREFIX_ENTITY: &str = "ent";

/// Every prefix in use, for tests that exercise ID generation.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_PATH, PREFIX_ENTITY];

/// Split a prefixed ID into `(prefix, random part)`.
///
/// Returns `None` if the ID has no `-` separator.
#[must_use]
pub fn split_id(id: &str) -> Option<(&str, &str)> {
    id.split_once('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_three_chars() {
        for prefix in ALL_PREFIXES {
            assert_eq!(prefix.len(), 3, "prefix '{prefix}' should be 3 chars");
        }
    }

    #[test]
    fn split_id_separates_prefix() {
        assert_eq!(split_id("pth-a3f8b2c1"), Some(("pth", "a3f8b2c1")));
        assert_eq!(split_id("nodash"), None);
    }
}
