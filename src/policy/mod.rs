mod builder;
pub use builder::PolicyBuilder;

use crate::errors::Result;
use crate::resolver::has_variable_token;
use crate::{Error, Matcher, Operation, Resource, Substituter};

/// Policy engine. Represents a read-only, ordered list of statements and
/// evaluates a `Request` against them.
///
/// Statements are checked in document order and the first one that
/// applies decides. A pattern holding any of the request substituter's
/// variables is resolved before matching; every other pattern is matched
/// as written.
#[derive(Debug)]
pub struct Policy<M> {
    default_decision: Decision,
    matcher: M,
    statements: Vec<Statement>,
}

impl<M> Policy<M>
where
    M: Matcher,
{
    /// Evaluates the provided `&Request` and produces the `Decision`.
    ///
    /// Public operations are always allowed. If no statement applies to
    /// the `&Request`, the default `Decision` is returned.
    pub fn evaluate<S>(&self, request: &Request, substituter: &S) -> Decision
    where
        S: Substituter,
    {
        if request.operation.is_public() {
            tracing::debug!(operation = %request.operation, "Public operation, skipping checks");
            return Decision::Allowed;
        }

        for statement in &self.statements {
            if self.applies(statement, request, substituter) {
                tracing::debug!(
                    statement = statement.order,
                    description = %statement.description,
                    effect = ?statement.effect,
                    operation = %request.operation,
                    resource = ?request.resource.as_ref().map(Resource::as_str),
                    "Statement matched"
                );
                return statement.effect.into();
            }
        }

        tracing::debug!(
            operation = %request.operation,
            resource = ?request.resource.as_ref().map(Resource::as_str),
            decision = ?self.default_decision,
            "No statement matched, using default decision"
        );
        self.default_decision
    }

    /// Same as `evaluate`, but reports a denial as `Error::Forbidden`.
    pub fn authorize<S>(&self, request: &Request, substituter: &S) -> Result<()>
    where
        S: Substituter,
    {
        match self.evaluate(request, substituter) {
            Decision::Allowed => Ok(()),
            Decision::Denied => Err(Error::Forbidden {
                operation: request.operation.clone(),
                resource: request.resource.clone(),
            }),
        }
    }

    pub fn default_decision(&self) -> Decision {
        self.default_decision
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn applies<S>(&self, statement: &Statement, request: &Request, substituter: &S) -> bool
    where
        S: Substituter,
    {
        let operation_matches = statement.operations.iter().any(|pattern| {
            if substituter.contains_var(pattern.as_str()) {
                let pattern = substituter.resolve(pattern);
                log_unresolved(pattern.as_str());
                self.matcher.match_operation(&pattern, &request.operation)
            } else {
                log_unresolved(pattern.as_str());
                self.matcher.match_operation(pattern, &request.operation)
            }
        });
        if !operation_matches {
            return false;
        }

        // operation-level statement, or a request without a target.
        let resource = match &request.resource {
            Some(resource) if !statement.resources.is_empty() => resource,
            _ => return true,
        };

        statement.resources.iter().any(|pattern| {
            if substituter.contains_var(pattern.as_str()) {
                let pattern = substituter.resolve_resource(pattern);
                log_unresolved(pattern.as_str());
                self.matcher.match_resource(&pattern, resource)
            } else {
                log_unresolved(pattern.as_str());
                self.matcher.match_resource(pattern, resource)
            }
        })
    }
}

// `@name` left over after substitution can only match itself.
fn log_unresolved(pattern: &str) {
    if has_variable_token(pattern) {
        tracing::debug!(pattern, "Pattern holds an unresolved variable, matching it literally");
    }
}

/// A compiled policy statement.
#[derive(Debug, Clone)]
pub(crate) struct Statement {
    order: usize,
    description: String,
    effect: Effect,
    operations: Vec<Operation>,
    resources: Vec<Resource>,
}

impl Statement {
    pub(crate) fn new(
        order: usize,
        description: String,
        effect: Effect,
        operations: Vec<Operation>,
        resources: Vec<Resource>,
    ) -> Self {
        Self {
            order,
            description,
            effect,
            operations,
            resources,
        }
    }
}

/// What the caller wants to do, and optionally on which resource.
#[derive(Debug, Clone)]
pub struct Request {
    operation: Operation,
    resource: Option<Resource>,
}

impl Request {
    pub fn new(operation: impl Into<Operation>, resource: impl Into<Resource>) -> Result<Self> {
        let operation = operation.into();
        if operation.as_str().is_empty() {
            return Err(Error::BadRequest("Operation must be specified".into()));
        }

        Ok(Self {
            operation,
            resource: Some(resource.into()),
        })
    }

    /// A request for an operation that does not target a single resource.
    pub fn for_operation(operation: impl Into<Operation>) -> Result<Self> {
        let operation = operation.into();
        if operation.as_str().is_empty() {
            return Err(Error::BadRequest("Operation must be specified".into()));
        }

        Ok(Self {
            operation,
            resource: None,
        })
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl From<Effect> for Decision {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Allow => Decision::Allowed,
            Effect::Deny => Decision::Denied,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}
