use serde::Deserialize;

use crate::{
    policy::{Effect as CoreEffect, Statement},
    validator::Field,
    Decision, DefaultMatcher, DefaultValidator, Error, Matcher, Operation, Policy,
    PolicyValidator, Resource, Result,
};

/// Builds a [`Policy`] from its JSON definition.
///
/// ```
/// use urn_authz::{Decision, PolicyBuilder, Request, Resolver};
///
/// let json = r#"{
///     "statements": [
///         { "operations": ["self:*:*"], "resources": ["self:user:@me"] }
///     ]
/// }"#;
///
/// let policy = PolicyBuilder::from_json(json).build()?;
/// let resolver = Resolver::new(vec![("@me", "42")]);
/// let request = Request::new("self:profile:update", "self:user:42")?;
///
/// assert_eq!(Decision::Allowed, policy.evaluate(&request, &resolver));
/// # Ok::<(), urn_authz::Error>(())
/// ```
pub struct PolicyBuilder<V, M> {
    validator: V,
    matcher: M,
    json: String,
    default_decision: Decision,
}

impl PolicyBuilder<DefaultValidator, DefaultMatcher> {
    pub fn from_json(json: &str) -> Self {
        Self {
            json: json.into(),
            validator: DefaultValidator,
            matcher: DefaultMatcher,
            default_decision: Decision::Denied,
        }
    }
}

impl<V, M> PolicyBuilder<V, M>
where
    V: PolicyValidator,
    M: Matcher,
{
    pub fn with_validator<W>(self, validator: W) -> PolicyBuilder<W, M>
    where
        W: PolicyValidator,
    {
        PolicyBuilder {
            validator,
            matcher: self.matcher,
            json: self.json,
            default_decision: self.default_decision,
        }
    }

    pub fn with_matcher<N>(self, matcher: N) -> PolicyBuilder<V, N>
    where
        N: Matcher,
    {
        PolicyBuilder {
            validator: self.validator,
            matcher,
            json: self.json,
            default_decision: self.default_decision,
        }
    }

    pub fn with_default_decision(mut self, decision: Decision) -> Self {
        self.default_decision = decision;
        self
    }

    pub fn build(self) -> Result<Policy<M>> {
        let definition: PolicyDefinition =
            serde_json::from_str(&self.json).map_err(Error::Deserializing)?;

        let mut statements = Vec::with_capacity(definition.statements.len());
        for (order, statement) in definition.statements.into_iter().enumerate() {
            validate_statement(&self.validator, &statement)?;
            statements.push(Statement::new(
                order,
                statement.description,
                statement.effect.into(),
                statement.operations.into_iter().map(Operation::new).collect(),
                statement.resources.into_iter().map(Resource::new).collect(),
            ));
        }

        tracing::debug!(
            statements = statements.len(),
            default_decision = ?self.default_decision,
            "Built policy"
        );

        Ok(Policy {
            default_decision: self.default_decision,
            matcher: self.matcher,
            statements,
        })
    }
}

fn validate_statement<V>(validator: &V, statement: &StatementDefinition) -> Result<()>
where
    V: PolicyValidator,
{
    if !statement.description.is_empty() {
        validator.validate(Field::Description, &statement.description)?;
    }
    for operation in &statement.operations {
        validator.validate(Field::Operations, operation)?;
    }
    for resource in &statement.resources {
        validator.validate(Field::Resources, resource)?;
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyDefinition {
    statements: Vec<StatementDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementDefinition {
    #[serde(default)]
    description: String,
    #[serde(default)]
    effect: EffectDefinition,
    operations: Vec<String>,
    #[serde(default)]
    resources: Vec<String>,
}

#[derive(Deserialize, Copy, Clone)]
#[serde(rename_all = "camelCase")]
enum EffectDefinition {
    Allow,
    Deny,
}

impl Default for EffectDefinition {
    fn default() -> Self {
        EffectDefinition::Allow
    }
}

impl From<EffectDefinition> for CoreEffect {
    fn from(effect: EffectDefinition) -> Self {
        match effect {
            EffectDefinition::Allow => CoreEffect::Allow,
            EffectDefinition::Deny => CoreEffect::Deny,
        }
    }
}
