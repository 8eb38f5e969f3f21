use serde::{Deserialize, Serialize};

use crate::Resolver;

/// Variable tokens bound to the caller's identity.
///
/// Passed explicitly to [`Identity::resolver`]; deserializes from config
/// with any missing name falling back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VariableNames {
    pub user: String,
    pub org: String,
    pub team: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            user: "@me".into(),
            org: "@org".into(),
            team: "@team".into(),
        }
    }
}

/// The authenticated caller a request is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    org_id: Option<String>,
    team_id: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: None,
            team_id: None,
        }
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    /// Binds this identity's ids to `names`.
    ///
    /// A missing org or team binds nothing, so its token stays literal
    /// and only matches patterns spelling out that same token.
    pub fn resolver(&self, names: &VariableNames) -> Resolver {
        let mut vars = vec![(names.user.as_str(), self.user_id.as_str())];
        if let Some(org_id) = &self.org_id {
            vars.push((names.org.as_str(), org_id.as_str()));
        }
        if let Some(team_id) = &self.team_id {
            vars.push((names.team.as_str(), team_id.as_str()));
        }
        Resolver::new(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Substituter;

    #[test]
    fn resolver_binds_all_ids() {
        let identity = Identity::new("42").with_org("acme").with_team("dev");
        let resolver = identity.resolver(&VariableNames::default());

        assert_eq!(
            "org.acme.team.dev:member:42",
            resolver.resolve_string("org.@org.team.@team:member:@me")
        );
    }

    #[test]
    fn missing_org_leaves_token() {
        let identity = Identity::new("42");
        let resolver = identity.resolver(&VariableNames::default());

        assert_eq!(1, resolver.len());
        assert_eq!("org.@org:user:42", resolver.resolve_string("org.@org:user:@me"));
        assert_eq!(None, identity.org_id());
    }

    #[test]
    fn custom_variable_names() {
        let names = VariableNames {
            user: "{{user}}".into(),
            ..VariableNames::default()
        };
        let resolver = Identity::new("7").resolver(&names);

        assert_eq!("self:user:7", resolver.resolve_string("self:user:{{user}}"));
        assert_eq!("self:user:@me", resolver.resolve_string("self:user:@me"));
    }

    #[test]
    fn variable_names_deserialize_with_defaults() {
        let names: VariableNames = serde_json::from_str(r#"{ "team": "@squad" }"#).unwrap();

        assert_eq!("@me", names.user);
        assert_eq!("@org", names.org);
        assert_eq!("@squad", names.team);
    }
}
