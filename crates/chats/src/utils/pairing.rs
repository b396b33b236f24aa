/// Room and conversation key for two participants: both ids sorted, joined by `_`.
///
/// ```
/// use nutri_chats::canonical_pair_key;
///
/// assert_eq!(canonical_pair_key("b", "a"), "a_b");
/// ```
pub fn canonical_pair_key(first: &str, second: &str) -> String {
    if first <= second {
        format!("{first}_{second}")
    } else {
        format!("{second}_{first}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_symmetric() {
        let pairs = [
            ("user-1", "nutri-9"),
            ("0b8f6c2e", "0b8f6c2d"),
            ("same", "same"),
            ("", "x"),
        ];
        for (a, b) in pairs {
            assert_eq!(canonical_pair_key(a, b), canonical_pair_key(b, a));
        }
    }

    #[test]
    fn test_key_orders_lexicographically() {
        assert_eq!(canonical_pair_key("nutri-9", "user-1"), "nutri-9_user-1");
        assert_eq!(canonical_pair_key("10", "9"), "10_9");
    }
}
