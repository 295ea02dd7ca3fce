use chrono::{DateTime, Utc};
use pixel_macros::entity;

/// 订单，`customer_id` 引用客户的内部标识
#[entity]
pub struct Order {
    pub customer_id: u64,
    pub order_date: DateTime<Utc>,
}
