//! Ownership rule shared by map and record commands.

/// A map or record may be changed by the user who posted it, or by any moderator.
#[must_use]
pub fn may_modify(owner_id: &str, author_id: u64, is_moderator: bool) -> bool {
    is_moderator || owner_id == author_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_or_moderator() {
        assert!(may_modify("42", 42, false));
        assert!(may_modify("42", 7, true));
        assert!(may_modify("42", 42, true));
        assert!(!may_modify("42", 7, false));
    }
}
