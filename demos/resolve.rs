use urn_authz::{match_resource, Identity, Resource, Substituter, VariableNames};

fn main() {
    // Identity of the authenticated caller (e.g. taken from a session).
    let identity = Identity::new("42").with_org("acme").with_team("dev");

    // Bind the caller's ids to the default `@me`, `@org` and `@team` tokens.
    let resolver = identity.resolver(&VariableNames::default());

    // Permission patterns as stored next to a role.
    let granted = [
        Resource::new("self:user:@me"),
        Resource::new("org.@org.*:*:*"),
    ];

    for target in &["self:user:42", "org.acme.team.dev:member:7", "org.other:member:7"] {
        let target = Resource::new(*target);
        let allowed = granted
            .iter()
            .map(|pattern| resolver.resolve_resource(pattern))
            .any(|pattern| match_resource(&pattern, &target));

        println!("{}: {}", target, if allowed { "allowed" } else { "denied" });
    }
}
