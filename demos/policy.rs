use urn_authz::{Decision, Identity, PolicyBuilder, Request, Result, VariableNames};

fn main() -> Result<()> {
    let json = r#"{
        "statements": [
            {
                "effect": "deny",
                "operations": [
                    "org:billing:*"
                ]
            },
            {
                "effect": "allow",
                "operations": [
                    "org:*:*"
                ],
                "resources": [
                    "org.{{org}}.*:*:*"
                ]
            }
        ]
    }"#;

    // Construct the policy.
    let policy = PolicyBuilder::from_json(json)
        .with_default_decision(Decision::Denied)
        .build()?;

    // Variable tokens used by this deployment's policies.
    let names = VariableNames {
        org: "{{org}}".into(),
        ..VariableNames::default()
    };
    let resolver = Identity::new("42").with_org("acme").resolver(&names);

    // Prepare request (e.g. from the route being served).
    let request = Request::new("org:members:read", "org.acme.team.dev:member:7")?;

    // Evaluate the request.
    match policy.evaluate(&request, &resolver) {
        Decision::Allowed => println!("Allowed"),
        Decision::Denied => {
            panic!("Denied!")
        }
    };

    // Billing stays closed, whatever the resource.
    let request = Request::new("org:billing:read", "org.acme:invoice:1")?;
    if let Err(e) = policy.authorize(&request, &resolver) {
        println!("{}", e);
    }

    Ok(())
}
