use pixel_macros::entity;
use uuid::Uuid;

use super::Email;

/// 客户，可选关联注册用户（外部标识）
#[entity]
pub struct Customer {
    pub user_id: Option<Uuid>,
    pub email: Email,
}
