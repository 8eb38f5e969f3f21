//! Hierarchical URN permissions.
//!
//! Operations and resources are named `{scope}:{type}:{identifier}`,
//! where the scope is a dot-separated hierarchy (`org.acme.team.dev`).
//! Permission patterns may use `*` for any segment and `scope.*` for a
//! scope together with everything below it, and may hold runtime
//! variables (`@me`, `@org`, `@team`) that a [`Resolver`] bound to the
//! caller fills in before matching.
//!
//! ```
//! use urn_authz::{match_resource, Resolver, Resource, Substituter};
//!
//! let resolver = Resolver::new(vec![("@org", "acme")]);
//! let resource = resolver.resolve_resource(&Resource::new("org.@org:team:dev"));
//!
//! assert!(match_resource(&Resource::new("org.acme.*:*:*"), &resource));
//! assert!(!match_resource(&Resource::new("org.other.*:*:*"), &resource));
//! ```
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]
mod errors;
mod identity;
mod matcher;
mod operation;
mod policy;
mod resolver;
mod resource;
pub mod urn;
mod validator;

pub use errors::{Error, Result};
pub use identity::{Identity, VariableNames};
pub use matcher::{match_operation, match_resource, DefaultMatcher, Matcher};
pub use operation::{Operation, PUBLIC_SCOPE};
pub use policy::{Decision, Effect, Policy, PolicyBuilder, Request};
pub use resolver::{Resolver, Substituter};
pub use resource::Resource;
pub use urn::new_urn;
pub use validator::{DefaultValidator, Field, PolicyValidator};
