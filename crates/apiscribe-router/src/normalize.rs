//! Template normalization into document keys.

use crate::template::matching_brace;

/// Turns a route template into the key used in the `paths` object.
///
/// The base-path prefix is removed and inline constraints are collapsed, so
/// `/api/v1/users/{id:[0-9]+}` under base path `/api/v1` becomes
/// `/users/{id}`.
///
/// # Example
///
/// ```rust
/// use apiscribe_router::normalize_template;
///
/// assert_eq!(normalize_template("/api/v1/users/{id:[0-9]+}", "/api/v1"), "/users/{id}");
/// assert_eq!(normalize_template("/users/{id}", "/api/v1"), "/users/{id}");
/// ```
#[must_use]
pub fn normalize_template(template: &str, base_path: &str) -> String {
    collapse_constraints(strip_base_path(template, base_path))
}

/// Removes every leading `base_path` from `path` at segment boundaries.
///
/// Repeated prefixes are all removed, so the result never starts with the
/// base path. A path equal to the base path becomes `/`. An empty or `/`
/// base path leaves the path untouched.
#[must_use]
pub fn strip_base_path<'a>(mut path: &'a str, base_path: &str) -> &'a str {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    loop {
        match path.strip_prefix(base) {
            Some("") => return "/",
            Some(rest) if rest.starts_with('/') => path = rest,
            _ => return path,
        }
    }
}

/// Rewrites every `{name:pattern}` placeholder to `{name}`.
///
/// Placeholders without a constraint and text with unbalanced braces are
/// copied unchanged.
#[must_use]
pub fn collapse_constraints(template: &str) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied_up_to = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        let Some(close) = matching_brace(bytes, i) else {
            break;
        };
        let inner = &template[i + 1..close];
        if let Some((name, _)) = inner.split_once(':') {
            out.push_str(&template[copied_up_to..i]);
            out.push('{');
            out.push_str(name.trim());
            out.push('}');
            copied_up_to = close + 1;
        }
        i = close + 1;
    }

    out.push_str(&template[copied_up_to..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_base_path() {
        assert_eq!(strip_base_path("/api/v1/users", "/api/v1"), "/users");
        assert_eq!(strip_base_path("/api/v1/users", "/api/v1/"), "/users");
        assert_eq!(strip_base_path("/api/v1", "/api/v1"), "/");
        assert_eq!(strip_base_path("/api/v10/users", "/api/v1"), "/api/v10/users");
        assert_eq!(strip_base_path("/other/users", "/api/v1"), "/other/users");
    }

    #[test]
    fn test_strip_repeated_base_path() {
        assert_eq!(strip_base_path("/api/v1/api/v1/users", "/api/v1"), "/users");
        assert_eq!(strip_base_path("/api/v1/api/v1", "/api/v1"), "/");
        assert_eq!(
            strip_base_path("/api/v1/api/v10/users", "/api/v1"),
            "/api/v10/users"
        );
    }

    #[test]
    fn test_strip_empty_base_path() {
        assert_eq!(strip_base_path("/users", ""), "/users");
        assert_eq!(strip_base_path("/users", "/"), "/users");
    }

    #[test]
    fn test_collapse_constraints() {
        assert_eq!(collapse_constraints("/users/{id:[0-9]+}"), "/users/{id}");
        assert_eq!(
            collapse_constraints(r"/codes/{code:\d{2,4}}/x/{y}"),
            "/codes/{code}/x/{y}"
        );
        assert_eq!(collapse_constraints("/users/{ id : \\d+ }"), "/users/{id}");
    }

    #[test]
    fn test_collapse_leaves_plain_placeholders() {
        assert_eq!(collapse_constraints("/users/{id}"), "/users/{id}");
        assert_eq!(collapse_constraints("/users"), "/users");
    }

    #[test]
    fn test_collapse_unbalanced_is_copied() {
        assert_eq!(collapse_constraints("/users/{id:[0-9]+"), "/users/{id:[0-9]+");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let templates = [
            "/api/v1/users/{id:[0-9]+}",
            "/api/v1/orgs/{org}/users/{user:\\d{1,3}}",
            "/api/v1",
            "/api/v1/api/v1/users/{id:[0-9]+}",
            "/api/v1/api/v1/api/v1",
            "/health",
        ];
        for template in templates {
            let once = normalize_template(template, "/api/v1");
            let twice = normalize_template(&once, "/api/v1");
            assert_eq!(once, twice, "normalizing {template} twice changed it");
        }
    }

    #[test]
    fn test_normalize_round_trip() {
        assert_eq!(
            normalize_template("/api/v1/users/{id:[0-9]+}", "/api/v1"),
            "/users/{id}"
        );
    }
}
