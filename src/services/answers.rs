/// Case-insensitive comparison that ignores surrounding whitespace.
pub(crate) fn answers_match(given: &str, expected: &str) -> bool {
    given.to_lowercase().trim() == expected.to_lowercase().trim()
}
