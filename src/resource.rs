use std::fmt;

use serde::{Deserialize, Serialize};

use crate::urn::{new_urn, Urn, UNIVERSAL, WILDCARD};

/// A target of an operation, formatted as `{scope}:{type}:{id}`.
///
/// Identifiers may hold runtime variables such as `@me` or `@org`,
/// which a [`crate::Resolver`] replaces before matching:
///
/// - `sys:user:123` system user 123
/// - `self:user:@me` the current user
/// - `org.acme:user:*` every user of org `acme`
/// - `*:*:*` everything
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Urn);

impl Resource {
    pub fn new(value: impl Into<String>) -> Self {
        Resource(Urn::new(value))
    }

    /// Resource pattern matching every resource.
    pub fn all() -> Self {
        Resource::new(UNIVERSAL)
    }

    pub fn from_parts(scope: &str, kind: &str, id: &str) -> Self {
        Resource(Urn::new(new_urn(scope, kind, id)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0.into_string()
    }

    pub fn scope(&self) -> &str {
        self.0.parts().scope
    }

    /// The type segment, e.g. `user` in `sys:user:123`.
    pub fn kind(&self) -> &str {
        self.0.parts().kind
    }

    /// The id segment, e.g. `123` in `sys:user:123`.
    pub fn identifier(&self) -> &str {
        self.0.parts().identifier
    }

    /// Reports whether the resource is the universal wildcard.
    ///
    /// Only `*` and `*:*:*` qualify; a partial wildcard such as
    /// `org.acme:user:*` does not.
    pub fn is_wildcard(&self) -> bool {
        let value = self.as_str();
        value == WILDCARD || value == UNIVERSAL
    }

    /// Checks whether this resource, used as a pattern, grants `resource`.
    pub fn matches(&self, resource: &Resource) -> bool {
        crate::matcher::match_resource(self, resource)
    }
}

impl From<&str> for Resource {
    fn from(value: &str) -> Self {
        Resource::new(value)
    }
}

impl From<String> for Resource {
    fn from(value: String) -> Self {
        Resource::new(value)
    }
}

impl AsRef<str> for Resource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_detection() {
        assert!(Resource::new("*:*:*").is_wildcard());
        assert!(Resource::new("*").is_wildcard());
        assert!(Resource::all().is_wildcard());
        assert!(!Resource::new("org.acme:user:*").is_wildcard());
        assert!(!Resource::new("*:*").is_wildcard());
    }

    #[test]
    fn accessors() {
        let resource = Resource::from_parts("org.acme", "user", "42");
        assert_eq!("org.acme:user:42", resource.as_str());
        assert_eq!("org.acme", resource.scope());
        assert_eq!("user", resource.kind());
        assert_eq!("42", resource.identifier());
    }

    #[test]
    fn variables_are_plain_text_until_resolved() {
        let resource = Resource::new("self:user:@me");
        assert_eq!("@me", resource.identifier());
        assert!(!Resource::new("self:user:@me").matches(&"self:user:42".into()));
        assert!(resource.matches(&"self:user:@me".into()));
    }
}
