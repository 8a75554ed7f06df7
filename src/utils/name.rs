use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Whitespace pattern should be valid"));
static HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("Hyphen pattern should be valid"));

/// Turns a folder name into the key used inside statistics documents. Whitespace becomes a single
/// hyphen and surrounding hyphens are dropped, so "My  Novel " is stored as "My-Novel".
pub fn sanitize_name(name: &str) -> String {
    let name = WHITESPACE.replace_all(name, "-");
    let name = HYPHENS.replace_all(&name, "-");
    name.trim_matches('-').to_string()
}
