use crate::error::AppError;

/// Strips a single trailing `/` from `path`, if present.
///
/// Listing paths mark directories with one trailing slash; only that one
/// is removed here, unlike [`normalize`] which removes them all.
pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Derives the display name of a listing path: the segment after the last
/// path separator (`/` or `\`), with a single trailing `/` ignored.
pub fn leaf_name(path: &str) -> &str {
    let stripped = strip_trailing_slash(path);
    stripped
        .rfind(['/', '\\'])
        .map(|idx| &stripped[idx + 1..])
        .unwrap_or(stripped)
}

pub fn normalize(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }
    normalized
}

pub fn is_within_scope(path: &str, root: &str) -> bool {
    let path = normalize(path);
    let root = normalize(root);

    if path == root {
        return true;
    }

    if root == "/" {
        return path.starts_with('/');
    }

    path.starts_with(&(root + "/"))
}

/// Removes the first occurrence of `prefix` from `s`; returns `s` unchanged
/// when the prefix does not occur.
pub fn strip_prefix_once(s: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return s.to_string();
    }
    match s.find(prefix) {
        Some(idx) => {
            let mut out = String::with_capacity(s.len() - prefix.len());
            out.push_str(&s[..idx]);
            out.push_str(&s[idx + prefix.len()..]);
            out
        }
        None => s.to_string(),
    }
}

/// Decodes a percent-encoded location string. `+` decodes to a space,
/// matching the URL form decoding the original front-end relied on.
pub fn percent_decode(s: &str) -> Result<String, AppError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|pair| std::str::from_utf8(pair).ok())
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| {
                        AppError::General(format!("invalid percent-encoding in: {s}"))
                    })?;
                out.push(hex);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| AppError::General(format!("decoded location is not valid UTF-8: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_trailing_slash_removes_only_one() {
        assert_eq!(strip_trailing_slash("a/b/"), "a/b");
        assert_eq!(strip_trailing_slash("a/b//"), "a/b/");
        assert_eq!(strip_trailing_slash("a/b"), "a/b");
        assert_eq!(strip_trailing_slash(""), "");
    }

    #[test]
    fn leaf_name_takes_last_segment() {
        assert_eq!(leaf_name("a/b/c"), "c");
        assert_eq!(leaf_name("a/b/c/"), "c");
        assert_eq!(leaf_name("file.txt"), "file.txt");
        assert_eq!(leaf_name("a\\b\\c"), "c");
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize("/foo/bar/"), "/foo/bar");
        assert_eq!(normalize("/foo/bar///"), "/foo/bar");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(normalize("C:\\Users\\test"), "C:/Users/test");
    }

    #[test]
    fn within_scope_exact_match() {
        assert!(is_within_scope("/foo/bar", "/foo/bar"));
        assert!(is_within_scope("/foo/bar/", "/foo/bar"));
    }

    #[test]
    fn within_scope_child_path() {
        assert!(is_within_scope("/foo/bar/baz", "/foo/bar"));
        assert!(!is_within_scope("/foo/barbaz", "/foo/bar"));
    }

    #[test]
    fn within_scope_root() {
        assert!(is_within_scope("/anything", "/"));
        assert!(!is_within_scope("/anything", "/other"));
    }

    #[test]
    fn not_within_scope_sibling() {
        assert!(!is_within_scope("/foo/other", "/foo/bar"));
    }

    #[test]
    fn strip_prefix_once_removes_first_occurrence() {
        assert_eq!(strip_prefix_once("/app/docs/app", "/app"), "/docs/app");
        assert_eq!(strip_prefix_once("/docs", "/app"), "/docs");
        assert_eq!(strip_prefix_once("/app", "/app"), "");
        assert_eq!(strip_prefix_once("/app", ""), "/app");
    }

    #[test]
    fn percent_decode_handles_escapes() {
        assert_eq!(percent_decode("/docs/a%20b").unwrap(), "/docs/a b");
        assert_eq!(percent_decode("/docs/a+b").unwrap(), "/docs/a b");
        assert_eq!(percent_decode("/docs/plain").unwrap(), "/docs/plain");
        assert_eq!(percent_decode("%C3%A9").unwrap(), "é");
    }

    #[test]
    fn percent_decode_rejects_truncated_escape() {
        assert!(percent_decode("/docs/a%2").is_err());
        assert!(percent_decode("/docs/a%zz").is_err());
    }
}
