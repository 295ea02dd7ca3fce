use pixel_macros::{entity, value_object};

use super::Money;
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

#[value_object]
#[derive(Copy, Hash)]
pub struct Quantity(u32);

impl ValueObject for Quantity {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.0 == 0 {
            return Err(DomainError::invalid_value("quantity must be positive"));
        }
        Ok(())
    }
}

/// 订单行
#[entity]
pub struct OrderItem {
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: Quantity,
    pub unit_price: Money,
}

impl OrderItem {
    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price.times(*self.quantity.value())
    }
}
