/// Canonical comparison key for a displayed username.
///
/// Keeps only `[A-Za-z0-9_-]` and lowercases the rest, so decorations injected
/// next to a name (stars, whitespace, badges) never change the key. An empty
/// key means "no identifiable user".
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
