use std::fmt;

use serde::{Deserialize, Serialize};

/// Matches any value in the segment it occupies.
pub const WILDCARD: &str = "*";

/// The fully expanded universal pattern.
pub const UNIVERSAL: &str = "*:*:*";

const SEGMENT_SEPARATOR: char = ':';
const SCOPE_SEPARATOR: char = '.';

/// Segments of a parsed URN, borrowed from the source string.
///
/// Missing trailing segments are filled with [`WILDCARD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrnParts<'a> {
    pub scope: &'a str,
    pub scope_parts: Vec<&'a str>,
    pub kind: &'a str,
    pub identifier: &'a str,
}

impl UrnParts<'static> {
    fn universal() -> Self {
        Self {
            scope: WILDCARD,
            scope_parts: vec![WILDCARD],
            kind: WILDCARD,
            identifier: WILDCARD,
        }
    }
}

/// Splits `value` into `scope:type:identifier`.
///
/// Parsing never fails:
/// - `"*"` expands to `*:*:*`
/// - `"scope:type"` gets identifier `*`
/// - `"scope"` gets type and identifier `*`
/// - anything after the second colon stays in the identifier.
pub fn parse(value: &str) -> UrnParts<'_> {
    if value == WILDCARD {
        return UrnParts::universal();
    }

    let mut segments = value.splitn(3, SEGMENT_SEPARATOR);
    let scope = segments.next().unwrap_or(WILDCARD);
    let kind = segments.next().unwrap_or(WILDCARD);
    let identifier = segments.next().unwrap_or(WILDCARD);

    let scope_parts = if scope == WILDCARD {
        vec![WILDCARD]
    } else {
        scope.split(SCOPE_SEPARATOR).collect()
    };

    UrnParts {
        scope,
        scope_parts,
        kind,
        identifier,
    }
}

/// Joins the three segments into a URN string.
pub fn new_urn(scope: &str, kind: &str, identifier: &str) -> String {
    format!(
        "{}{}{}{}{}",
        scope, SEGMENT_SEPARATOR, kind, SEGMENT_SEPARATOR, identifier
    )
}

/// URN string shared by [`crate::Operation`] and [`crate::Resource`].
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Urn(String);

impl Urn {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Urn(value.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_string(self) -> String {
        self.0
    }

    pub(crate) fn parts(&self) -> UrnParts<'_> {
        parse(&self.0)
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("sys:users:create", "sys", "users", "create" ; "full urn")]
    #[test_case("sys:users", "sys", "users", "*" ; "missing identifier")]
    #[test_case("sys", "sys", "*", "*" ; "scope only")]
    #[test_case("*", "*", "*", "*" ; "universal wildcard")]
    #[test_case("", "", "*", "*" ; "empty string")]
    #[test_case("org.acme:file:a:b:c", "org.acme", "file", "a:b:c" ; "identifier keeps colons")]
    #[test_case("a::", "a", "", "" ; "empty segments are kept")]
    fn parse_segments(input: &str, scope: &str, kind: &str, identifier: &str) {
        let parts = parse(input);
        assert_eq!(scope, parts.scope);
        assert_eq!(kind, parts.kind);
        assert_eq!(identifier, parts.identifier);
    }

    #[test]
    fn parse_scope_hierarchy() {
        assert_eq!(
            vec!["org", "acme", "team", "dev"],
            parse("org.acme.team.dev:users:*").scope_parts
        );
        assert_eq!(vec!["sys"], parse("sys:users:create").scope_parts);
        assert_eq!(vec!["*"], parse("*").scope_parts);
        assert_eq!(vec!["*"], parse("*:users:create").scope_parts);
    }

    #[test]
    fn new_urn_joins_segments() {
        assert_eq!("org.acme:team:dev", new_urn("org.acme", "team", "dev"));
        assert_eq!("::", new_urn("", "", ""));
    }

    #[test]
    fn urn_serializes_as_plain_string() {
        let urn = Urn::new("self:user:@me");
        assert_eq!("\"self:user:@me\"", serde_json::to_string(&urn).unwrap());
        assert_eq!(urn.parts().identifier, "@me");
    }
}
