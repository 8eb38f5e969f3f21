use std::fmt;

use serde::{Deserialize, Serialize};

use crate::urn::{new_urn, Urn};

/// Scope of operations that skip authentication and authorization.
pub const PUBLIC_SCOPE: &str = "public";

/// An action to authorize, formatted as `{scope}:{type}:{action}`.
///
/// Common scopes are `public` (no checks), `sys` (system administration)
/// and `self` (the caller's own account):
///
/// ```
/// use urn_authz::Operation;
///
/// let operation = Operation::new("sys:users:create");
/// assert_eq!("sys", operation.scope());
/// assert_eq!("users", operation.kind());
/// assert_eq!("create", operation.identifier());
/// assert!(!operation.is_public());
/// ```
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operation(Urn);

impl Operation {
    pub fn new(value: impl Into<String>) -> Self {
        Operation(Urn::new(value))
    }

    pub fn from_parts(scope: &str, kind: &str, action: &str) -> Self {
        Operation(Urn::new(new_urn(scope, kind, action)))
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

    /// The type segment, e.g. `users` in `sys:users:create`.
    pub fn kind(&self) -> &str {
        self.0.parts().kind
    }

    /// The action segment, e.g. `create` in `sys:users:create`.
    pub fn identifier(&self) -> &str {
        self.0.parts().identifier
    }

    /// Reports whether the operation is open to anyone.
    pub fn is_public(&self) -> bool {
        self.scope() == PUBLIC_SCOPE
    }

    /// Checks whether this operation, used as a pattern, grants `operation`.
    pub fn matches(&self, operation: &Operation) -> bool {
        crate::matcher::match_operation(self, operation)
    }
}

impl From<&str> for Operation {
    fn from(value: &str) -> Self {
        Operation::new(value)
    }
}

impl From<String> for Operation {
    fn from(value: String) -> Self {
        Operation::new(value)
    }
}

impl AsRef<str> for Operation {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
