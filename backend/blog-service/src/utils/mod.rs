// Utility functions for the blog API

/// Escape `%`, `_` and `\` so user input matches literally inside a
/// LIKE/ILIKE pattern (PostgreSQL's default escape character is `\`).
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Wrap a search term as a substring ILIKE pattern.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
