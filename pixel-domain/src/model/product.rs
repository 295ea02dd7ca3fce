use pixel_macros::{entity, value_object};

use super::{Money, require_text};
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

#[value_object]
#[derive(Hash)]
pub struct ProductName(String);

#[value_object]
pub struct Description(String);

impl ValueObject for ProductName {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        require_text("product name", &self.0, 200)
    }
}

impl ValueObject for Description {
    type Error = DomainError;

    // 描述允许为空
    fn validate(&self) -> DomainResult<()> {
        if self.0.chars().count() > 2000 {
            return Err(DomainError::invalid_value(
                "description must be at most 2000 characters",
            ));
        }
        Ok(())
    }
}

/// 商品
#[entity]
pub struct Product {
    pub name: ProductName,
    pub price: Money,
    pub description: Description,
}
