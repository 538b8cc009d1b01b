//! Path normalization and `Author - Title` filename splitting.
//!
//! None of these functions fail: malformed input degrades to empty strings or
//! to the whole base name as title.

use std::path::MAIN_SEPARATOR;

/// Normalize `raw` into `(path, filename)`.
///
/// Both `/` and `\` become the platform separator and runs of separators are
/// collapsed. On non-Windows platforms a leading drive letter (`C:`) is moved
/// into the path as a first segment (`/C`).
pub fn normalize_path(raw: &str) -> (String, String) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (String::new(), String::new());
    }

    let mut path = String::with_capacity(raw.len() + 1);
    let mut last_was_separator = false;
    for c in raw.chars() {
        if c == '/' || c == '\\' {
            if !last_was_separator {
                path.push(MAIN_SEPARATOR);
            }
            last_was_separator = true;
        } else {
            path.push(c);
            last_was_separator = false;
        }
    }

    let mut chars = path.chars();
    if !cfg!(windows)
        && let (Some(drive), Some(':')) = (chars.next(), chars.next())
        && drive.is_alphabetic()
    {
        let rest = &path[drive.len_utf8() + 1..];
        path = format!("{MAIN_SEPARATOR}{drive}{rest}");
    }

    let filename = match path.rfind(MAIN_SEPARATOR) {
        Some(i) => path[i + MAIN_SEPARATOR.len_utf8()..].trim().to_string(),
        None => path.trim().to_string(),
    };

    (path, filename)
}

/// Split a filename into `(author, title)` on the first `" - "`.
pub fn split_author_title(filename: &str) -> (String, String) {
    let empty = || (String::new(), String::new());

    if filename.is_empty() {
        return empty();
    }

    let raw_base = match filename.rfind('.') {
        Some(i) => &filename[..i],
        None => filename,
    };
    if raw_base == "-" {
        return (String::new(), "-".to_string());
    }

    let base = raw_base.trim();
    if base == "-" {
        return empty();
    }
    if !base.contains('-') {
        return (String::new(), base.to_string());
    }

    match base.split_once(" - ") {
        Some((author, title)) => (author.trim().to_string(), title.trim().to_string()),
        None => empty(),
    }
}

/// Derive `(author, title)` from a raw path string.
pub fn parse(raw: &str) -> (String, String) {
    let (_, filename) = normalize_path(raw);
    split_author_title(&filename)
}
