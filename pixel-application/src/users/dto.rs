use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::User;
use serde::{Deserialize, Serialize};

use crate::dto::Dto;

/// 用户对外视图，仅暴露外部标识与公开字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Dto for UserResponse {}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.guid(),
            email: user.email.to_string(),
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
        }
    }
}
