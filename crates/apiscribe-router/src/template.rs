//! Route template parsing and compilation.
//!
//! Templates use the placeholder syntax of FastRoute-style routers:
//!
//! - `{name}` matches a single path segment (`[^/]+`)
//! - `{name:regex}` matches the inline regular expression
//!
//! Braces inside an inline regex are balanced, so `{code:\d{2,4}}` is one
//! placeholder named `code`. Every placeholder becomes one capture group of
//! an anchored regex, in declaration order.

use http::Method;
use regex::Regex;

use crate::bindings::PathBindings;
use crate::error::{RouterError, RouterResult};

/// Pattern used by placeholders without an inline constraint.
const DEFAULT_SEGMENT_PATTERN: &str = "[^/]+";

/// A lexical piece of a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Text matched literally.
    Literal(&'a str),
    /// A named variable with an optional inline constraint.
    Placeholder {
        name: &'a str,
        constraint: Option<&'a str>,
    },
}

/// Splits a template into literal text and placeholders.
pub(crate) fn tokenize(template: &str) -> RouterResult<Vec<Token<'_>>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                let close = matching_brace(bytes, i).ok_or_else(|| RouterError::UnbalancedBraces {
                    template: template.to_string(),
                })?;
                if literal_start < i {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                tokens.push(parse_placeholder(template, &template[i + 1..close])?);
                i = close + 1;
                literal_start = i;
            }
            b'}' => {
                return Err(RouterError::UnbalancedBraces {
                    template: template.to_string(),
                })
            }
            _ => i += 1,
        }
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    Ok(tokens)
}

/// Returns the index of the `}` closing the `{` at `open`.
pub(crate) fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_placeholder<'a>(template: &str, inner: &'a str) -> RouterResult<Token<'a>> {
    let (name, constraint) = match inner.split_once(':') {
        Some((name, constraint)) => (name.trim(), Some(constraint.trim())),
        None => (inner.trim(), None),
    };

    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_name {
        return Err(RouterError::InvalidPlaceholder {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    Ok(Token::Placeholder { name, constraint })
}

/// A compiled route: method, original template, anchored matcher and the
/// ordered variable names its capture groups bind to.
///
/// # Example
///
/// ```rust
/// use apiscribe_router::RouteTemplate;
/// use http::Method;
///
/// let route = RouteTemplate::compile(Method::GET, "/users/{id:[0-9]+}", "getUser").unwrap();
/// assert_eq!(route.variables(), ["id"]);
///
/// let bindings = route.matches("/users/42").unwrap();
/// assert_eq!(bindings.get("id"), Some("42"));
/// assert!(route.matches("/users/abc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    method: Method,
    pattern: String,
    matcher: Regex,
    variables: Vec<String>,
    handler: String,
}

impl RouteTemplate {
    /// Compiles a template for the given method.
    pub fn compile(
        method: Method,
        pattern: impl Into<String>,
        handler: impl Into<String>,
    ) -> RouterResult<Self> {
        let pattern = pattern.into();
        let tokens = tokenize(&pattern)?;

        let mut regex_source = String::with_capacity(pattern.len() + 16);
        let mut variables: Vec<String> = Vec::new();
        regex_source.push('^');

        for token in tokens {
            match token {
                Token::Literal(text) => regex_source.push_str(&regex::escape(text)),
                Token::Placeholder { name, constraint } => {
                    if variables.iter().any(|v| v == name) {
                        return Err(RouterError::DuplicateVariable {
                            template: pattern.clone(),
                            name: name.to_string(),
                        });
                    }
                    let segment = match constraint {
                        Some(constraint) => {
                            check_constraint(&pattern, name, constraint)?;
                            constraint
                        }
                        None => DEFAULT_SEGMENT_PATTERN,
                    };
                    regex_source.push('(');
                    regex_source.push_str(segment);
                    regex_source.push(')');
                    variables.push(name.to_string());
                }
            }
        }
        regex_source.push('$');

        let matcher = Regex::new(&regex_source).map_err(|e| RouterError::InvalidPattern {
            template: pattern.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            method,
            pattern,
            matcher,
            variables,
            handler: handler.into(),
        })
    }

    /// The HTTP method this route answers.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The template exactly as registered.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Variable names in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The handler identifier supplied at registration.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Returns true if the template has no placeholders.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.variables.is_empty()
    }

    /// Matches a concrete path, binding capture group *i* to variable *i*.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<PathBindings> {
        let captures = self.matcher.captures(path)?;
        let mut bindings = PathBindings::with_capacity(self.variables.len());
        for (index, name) in self.variables.iter().enumerate() {
            let value = captures.get(index + 1).map_or("", |m| m.as_str());
            bindings.push(name.as_str(), value);
        }
        Some(bindings)
    }
}

fn check_constraint(template: &str, name: &str, constraint: &str) -> RouterResult<()> {
    let compiled = Regex::new(constraint).map_err(|e| RouterError::InvalidPattern {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    // Group 0 is the whole match.
    if compiled.captures_len() > 1 {
        return Err(RouterError::CapturingGroup {
            template: template.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_static() {
        let tokens = tokenize("/users").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/users")]);
    }

    #[test]
    fn test_tokenize_placeholders() {
        let tokens = tokenize("/orgs/{org}/users/{id:[0-9]+}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/orgs/"),
                Token::Placeholder {
                    name: "org",
                    constraint: None
                },
                Token::Literal("/users/"),
                Token::Placeholder {
                    name: "id",
                    constraint: Some("[0-9]+")
                },
            ]
        );
    }

    #[test]
    fn test_tokenize_nested_braces_in_constraint() {
        let tokens = tokenize(r"/codes/{code:\d{2,4}}").unwrap();
        assert_eq!(
            tokens[1],
            Token::Placeholder {
                name: "code",
                constraint: Some(r"\d{2,4}")
            }
        );
    }

    #[test]
    fn test_tokenize_unbalanced() {
        assert!(matches!(
            tokenize("/users/{id"),
            Err(RouterError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            tokenize("/users/id}"),
            Err(RouterError::UnbalancedBraces { .. })
        ));
    }

    #[test]
    fn test_tokenize_invalid_name() {
        assert!(matches!(
            tokenize("/users/{}"),
            Err(RouterError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            tokenize("/users/{9lives}"),
            Err(RouterError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_compile_and_match_default_segment() {
        let route = RouteTemplate::compile(Method::GET, "/users/{id}", "getUser").unwrap();
        assert_eq!(route.matches("/users/abc").unwrap().get("id"), Some("abc"));
        assert!(route.matches("/users/abc/posts").is_none());
        assert!(route.matches("/users/").is_none());
    }

    #[test]
    fn test_compile_escapes_literals() {
        let route = RouteTemplate::compile(Method::GET, "/files/report.pdf", "report").unwrap();
        assert!(route.matches("/files/report.pdf").is_some());
        assert!(route.matches("/files/reportXpdf").is_none());
        assert!(route.is_static());
    }

    #[test]
    fn test_compile_positional_binding() {
        let route =
            RouteTemplate::compile(Method::GET, "/orgs/{org}/users/{user:[0-9]+}", "h").unwrap();
        let bindings = route.matches("/orgs/acme/users/7").unwrap();
        let pairs: Vec<_> = bindings.iter().collect();
        assert_eq!(pairs, vec![("org", "acme"), ("user", "7")]);
    }

    #[test]
    fn test_compile_rejects_capturing_constraint() {
        let result = RouteTemplate::compile(Method::GET, "/files/{kind:(png|jpg)}", "h");
        assert!(matches!(result, Err(RouterError::CapturingGroup { .. })));

        let ok = RouteTemplate::compile(Method::GET, "/files/{kind:(?:png|jpg)}", "h");
        assert!(ok.is_ok());
    }

    #[test]
    fn test_compile_rejects_invalid_regex() {
        let result = RouteTemplate::compile(Method::GET, "/users/{id:[0-9}", "h");
        assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
    }

    #[test]
    fn test_compile_rejects_duplicate_variable() {
        let result = RouteTemplate::compile(Method::GET, "/{id}/{id}", "h");
        assert!(matches!(result, Err(RouterError::DuplicateVariable { .. })));
    }

    #[test]
    fn test_pattern_is_kept_verbatim() {
        let route = RouteTemplate::compile(Method::GET, "/api/v1/users/{id:[0-9]+}", "h").unwrap();
        assert_eq!(route.pattern(), "/api/v1/users/{id:[0-9]+}");
        assert_eq!(route.handler(), "h");
        assert_eq!(*route.method(), Method::GET);
    }
}
