//! Cache key names.

/// The whole user collection, serialized as a JSON array.
pub const ALL_USERS: &str = "all_users";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_users_key_is_unprefixed() {
        assert_eq!(ALL_USERS, "all_users");
    }
}
