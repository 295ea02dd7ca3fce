//! PixelStore 目录实体与值对象
//!
mod address;
mod customer;
mod money;
mod order;
mod order_item;
mod product;
mod user;

pub use address::{Address, City, Country, PostalCode, State, Street};
pub use customer::Customer;
pub use money::{Currency, Money};
pub use order::Order;
pub use order_item::{OrderItem, Quantity};
pub use product::{Description, Product, ProductName};
pub use user::{Email, FirstName, LastName, User};

use crate::error::{DomainError, DomainResult};

// 文本型值对象的通用校验：非空白且不超过最大长度
pub(crate) fn require_text(field: &str, value: &str, max_len: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_value(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::invalid_value(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}
