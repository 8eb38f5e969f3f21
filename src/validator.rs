use crate::errors::Result;

/// Authoring-time checks applied to every value of a policy definition.
///
/// Matching itself never rejects a URN; implement this trait to refuse
/// patterns at `PolicyBuilder::build` time instead.
pub trait PolicyValidator {
    fn validate(&self, field: Field, value: &str) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Operations,
    Resources,
    Description,
}

/// Accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl PolicyValidator for DefaultValidator {
    fn validate(&self, _field: Field, _value: &str) -> Result<()> {
        Ok(())
    }
}
