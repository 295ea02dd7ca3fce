use pixel_macros::{entity, value_object};

use super::require_text;
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

#[value_object]
#[derive(Hash)]
pub struct FirstName(String);

#[value_object]
#[derive(Hash)]
pub struct LastName(String);

#[value_object]
#[derive(Hash)]
pub struct Email(String);

impl ValueObject for FirstName {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        require_text("first name", &self.0, 100)
    }
}

impl ValueObject for LastName {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        require_text("last name", &self.0, 100)
    }
}

impl ValueObject for Email {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        require_text("email", &self.0, 256)?;
        match self.0.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(DomainError::invalid_value(format!(
                "'{}' is not a valid email address",
                self.0
            ))),
        }
    }
}

/// 用户
#[entity]
pub struct User {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: Email,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
