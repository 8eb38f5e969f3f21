use crate::urn::{parse, UNIVERSAL, WILDCARD};
use crate::{Operation, Resource};

const SCOPE_HIERARCHY_SUFFIX: &str = ".*";

/// Decides whether a permission pattern grants a concrete identifier.
///
/// `Policy` evaluation goes through this trait, so an alternative
/// matching strategy can be plugged in with `PolicyBuilder::with_matcher`.
pub trait Matcher {
    fn match_operation(&self, pattern: &Operation, operation: &Operation) -> bool;
    fn match_resource(&self, pattern: &Resource, resource: &Resource) -> bool;
}

/// Segment-wise URN matching with `*` and `scope.*` wildcards.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMatcher;

impl Matcher for DefaultMatcher {
    fn match_operation(&self, pattern: &Operation, operation: &Operation) -> bool {
        match_operation(pattern, operation)
    }

    fn match_resource(&self, pattern: &Resource, resource: &Resource) -> bool {
        match_resource(pattern, resource)
    }
}

/// Checks whether the operation `pattern` grants `operation`.
///
/// ```
/// use urn_authz::{match_operation, Operation};
///
/// let op = Operation::new("sys.admin:config:update");
/// assert!(match_operation(&"*:*:*".into(), &op));
/// assert!(match_operation(&"sys.*:*:*".into(), &op));
/// assert!(match_operation(&"sys.admin:config:*".into(), &op));
/// assert!(!match_operation(&"sys:*:*".into(), &op));
/// ```
pub fn match_operation(pattern: &Operation, operation: &Operation) -> bool {
    matches(pattern.as_str(), operation.as_str())
}

/// Checks whether the resource `pattern` grants `resource`.
///
/// Patterns holding variables (`@me`, `@org`) must be resolved first,
/// otherwise the variable only matches itself literally.
pub fn match_resource(pattern: &Resource, resource: &Resource) -> bool {
    matches(pattern.as_str(), resource.as_str())
}

pub(crate) fn matches(pattern: &str, target: &str) -> bool {
    if pattern == WILDCARD || pattern == UNIVERSAL {
        return true;
    }

    if pattern == target {
        return true;
    }

    let p = parse(pattern);
    let t = parse(target);

    if !match_scope(p.scope, t.scope) {
        tracing::trace!(pattern, target, segment = "scope", "Segment mismatch");
        return false;
    }

    if !match_segment(p.kind, t.kind) {
        tracing::trace!(pattern, target, segment = "type", "Segment mismatch");
        return false;
    }

    if !match_segment(p.identifier, t.identifier) {
        tracing::trace!(pattern, target, segment = "identifier", "Segment mismatch");
        return false;
    }

    true
}

fn match_segment(pattern: &str, value: &str) -> bool {
    pattern == WILDCARD || pattern == value
}

// `sys.*` covers `sys` itself and every scope below it, but not `system`.
fn match_scope(pattern: &str, scope: &str) -> bool {
    if pattern == WILDCARD {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix(SCOPE_HIERARCHY_SUFFIX) {
        return scope == prefix
            || scope
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'));
    }

    pattern == scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("*:*:*", "sys:users:create" => true ; "universal pattern")]
    #[test_case("*", "sys:users:create" => true ; "short universal pattern")]
    #[test_case("sys:users:create", "sys:users:create" => true ; "exact match")]
    #[test_case("sys:*:*", "sys:users:create" => true ; "type and identifier wildcards")]
    #[test_case("sys:users:*", "sys:users:create" => true ; "identifier wildcard")]
    #[test_case("sys:users:delete", "sys:users:create" => false ; "identifier mismatch")]
    #[test_case("sys:roles:*", "sys:users:create" => false ; "type mismatch")]
    #[test_case("*:users:create", "org.acme:users:create" => true ; "scope wildcard")]
    #[test_case("sys.*:*:*", "sys.admin:config:update" => true ; "child scope")]
    #[test_case("sys.*:*:*", "sys:config:update" => true ; "hierarchy includes its root")]
    #[test_case("sys.*:*:*", "sys.admin.billing:config:update" => true ; "grandchild scope")]
    #[test_case("sys.*:*:*", "sysadmin:config:update" => false ; "shared prefix without dot")]
    #[test_case("sys.*:*:*", "system:config:update" => false ; "longer sibling scope")]
    #[test_case("sys", "sys:users:create" => true ; "scope only pattern")]
    #[test_case("sys:users", "sys:users:create" => true ; "two segment pattern")]
    #[test_case("sys", "sys.admin:users:create" => false ; "scope only is not hierarchical")]
    #[test_case("SYS:users:create", "sys:users:create" => false ; "scope is case sensitive")]
    #[test_case("self:user:@me", "self:user:42" => false ; "unresolved variable is literal")]
    #[test_case("self:user:@me", "self:user:@me" => true ; "unresolved variable matches itself")]
    #[test_case("org.acme:file:a:b", "org.acme:file:a:b" => true ; "identifier with colons")]
    #[test_case("org.acme:file:*", "org.acme:file:a:b" => true ; "wildcard spans identifier colons")]
    #[test_case("sys:users:create", "sys" => false ; "short target gets wildcard segments")]
    fn match_table(pattern: &str, target: &str) -> bool {
        matches(pattern, target)
    }

    #[test]
    fn hierarchical_scope_containment() {
        let pattern = Resource::new("a.*:*:*");
        for target in &["a", "a.b", "a.b.c"] {
            assert!(match_resource(&pattern, &Resource::new(*target)), "{}", target);
        }
        assert!(!match_resource(&pattern, &Resource::new("ab")));
    }

    #[test]
    fn default_matcher_delegates() {
        let matcher = DefaultMatcher;
        assert!(matcher.match_operation(&"sys:users:*".into(), &"sys:users:create".into()));
        assert!(matcher.match_resource(&"org.acme.*".into(), &"org.acme.team.dev:team:dev".into()));
        assert!(!matcher.match_resource(&"org.acme.*".into(), &"org.other:team:dev".into()));
    }

    proptest! {
        #[test]
        fn universal_patterns_match_anything(target in ".*") {
            prop_assert!(matches("*", &target));
            prop_assert!(matches("*:*:*", &target));
        }

        #[test]
        fn pattern_matches_itself(pattern in ".*") {
            prop_assert!(matches(&pattern, &pattern));
        }

        #[test]
        fn identifier_wildcard_matches_any_identifier(
            scope in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}",
            kind in "[a-z]{1,8}",
            identifier in "[a-z0-9@]{1,12}",
        ) {
            let pattern = format!("{}:{}:*", scope, kind);
            let target = format!("{}:{}:{}", scope, kind, identifier);
            prop_assert!(matches(&pattern, &target));
        }

        #[test]
        fn scope_hierarchy_covers_descendants(
            root in "[a-z]{1,8}",
            children in proptest::collection::vec("[a-z]{1,8}", 0..4),
        ) {
            let mut scope = root.clone();
            for child in &children {
                scope.push('.');
                scope.push_str(child);
            }
            let pattern = format!("{}.*:*:*", root);
            let target = format!("{}:users:create", scope);
            prop_assert!(matches(&pattern, &target));
        }
    }
}
