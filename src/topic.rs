/// Announcement for a channel whose topic changed, or `None` if it didn't.
pub fn announce(before: Option<&str>, after: Option<&str>) -> Option<String> {
    if before == after {
        return None;
    }
    Some(format!("New topic:\n```\n{}```", after.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed() {
        assert_eq!(
            announce(Some("lunch at 11"), Some("lunch at 12")).as_deref(),
            Some("New topic:\n```\nlunch at 12```")
        );
    }

    #[test]
    fn test_unchanged() {
        assert_eq!(announce(Some("same"), Some("same")), None);
        assert_eq!(announce(None, None), None);
    }

    #[test]
    fn test_cleared_and_set() {
        assert_eq!(
            announce(Some("old"), None).as_deref(),
            Some("New topic:\n```\n```")
        );
        assert_eq!(
            announce(None, Some("fresh")).as_deref(),
            Some("New topic:\n```\nfresh```")
        );
    }
}
