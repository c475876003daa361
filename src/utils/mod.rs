//! Utility functions and helpers

/// Strip any query string or fragment from a file name
pub fn strip_query(file: &str) -> &str {
    match file.find(|c: char| c == '?' || c == '#') {
        Some(pos) => &file[..pos],
        None => file,
    }
}

/// Separator for appending one more query parameter to `file`
pub fn query_separator(file: &str) -> char {
    if file.contains('?') {
        '&'
    } else {
        '?'
    }
}

/// Escape a value for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
