use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Operation, Resource};

lazy_static! {
    // Conventional `@name` variable, e.g. `@me`, `@org`, `@team`.
    static ref VARIABLE_TOKEN: Regex = Regex::new(r"@[A-Za-z0-9_]+").unwrap();
}

/// Reports whether `value` holds an `@`-prefixed variable token.
pub(crate) fn has_variable_token(value: &str) -> bool {
    VARIABLE_TOKEN.is_match(value)
}

/// Replaces runtime variables inside URNs.
///
/// Implemented by [`Resolver`] and by `Option<S>`, where `None` leaves
/// every value untouched. Borrowed values come back borrowed when nothing
/// was replaced.
pub trait Substituter {
    fn resolve_string<'a>(&self, value: &'a str) -> Cow<'a, str>;

    fn contains_var(&self, value: &str) -> bool;

    fn resolve(&self, operation: &Operation) -> Operation {
        match self.resolve_string(operation.as_str()) {
            Cow::Borrowed(_) => operation.clone(),
            Cow::Owned(resolved) => Operation::new(resolved),
        }
    }

    fn resolve_resource(&self, resource: &Resource) -> Resource {
        match self.resolve_string(resource.as_str()) {
            Cow::Borrowed(_) => resource.clone(),
            Cow::Owned(resolved) => Resource::new(resolved),
        }
    }
}

/// Immutable set of variable substitutions bound to one caller.
///
/// Variables are arbitrary substrings; the `@` prefix is only a
/// convention. Tokens are applied longest first (ties in lexical order),
/// so `@member` is replaced before `@me` gets a chance to eat its prefix.
/// A token that is a substring of another unrelated word is still
/// replaced inside it: `@me` turns `@meeting` into `42eting`.
///
/// ```
/// use urn_authz::{Resolver, Substituter};
///
/// let resolver = Resolver::new(vec![("@me", "123"), ("@org", "acme")]);
/// assert_eq!("self:user:123", resolver.resolve_string("self:user:@me"));
/// assert_eq!("org.acme:team:*", resolver.resolve_string("org.@org:team:*"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    // sorted by descending token length, then token
    vars: Vec<(String, String)>,
}

impl Resolver {
    /// Builds a resolver from a copy of `vars`.
    ///
    /// Later duplicates of a token override earlier ones. Empty tokens
    /// are dropped since they would match between every character.
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let unique: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(token, value)| (token.into(), value.into()))
            .filter(|(token, _)| !token.is_empty())
            .collect();

        let mut vars: Vec<(String, String)> = unique.into_iter().collect();
        vars.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self { vars }
    }

    /// Returns a copy of the variable mapping.
    pub fn vars(&self) -> HashMap<String, String> {
        self.vars.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl Substituter for Resolver {
    fn resolve_string<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let mut resolved = Cow::Borrowed(value);
        for (token, replacement) in &self.vars {
            if resolved.contains(token.as_str()) {
                resolved = Cow::Owned(resolved.replace(token.as_str(), replacement));
            }
        }
        resolved
    }

    fn contains_var(&self, value: &str) -> bool {
        self.vars
            .iter()
            .any(|(token, _)| value.contains(token.as_str()))
    }
}

impl<S> Substituter for Option<S>
where
    S: Substituter,
{
    fn resolve_string<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Some(substituter) => substituter.resolve_string(value),
            None => Cow::Borrowed(value),
        }
    }

    fn contains_var(&self, value: &str) -> bool {
        self.as_ref()
            .is_some_and(|substituter| substituter.contains_var(value))
    }
}

impl<S> Substituter for &S
where
    S: Substituter + ?Sized,
{
    fn resolve_string<'a>(&self, value: &'a str) -> Cow<'a, str> {
        (**self).resolve_string(value)
    }

    fn contains_var(&self, value: &str) -> bool {
        (**self).contains_var(value)
    }
}
