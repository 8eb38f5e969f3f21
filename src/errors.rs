use thiserror::Error;

use crate::{Operation, Resource};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An error occurred deserializing policy definition: {0}.")]
    Deserializing(#[source] serde_json::Error),

    #[error("An error occurred validating policy definition: {0}.")]
    Validation(String),

    #[error("Bad request: {0}.")]
    BadRequest(String),

    #[error(
        "Operation {operation} is forbidden{}.",
        .resource.as_ref().map(|r| format!(" on {}", r)).unwrap_or_default()
    )]
    Forbidden {
        operation: Operation,
        resource: Option<Resource>,
    },
}
