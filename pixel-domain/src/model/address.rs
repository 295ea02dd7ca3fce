use pixel_macros::{entity, value_object};
use uuid::Uuid;

#[value_object]
pub struct Street(String);

#[value_object]
pub struct City(String);

#[value_object]
pub struct State(String);

#[value_object]
pub struct Country(String);

#[value_object]
pub struct PostalCode(String);

/// 地址，可选关联用户（外部标识）
#[entity]
pub struct Address {
    pub street: Street,
    pub city: City,
    pub state: State,
    pub country: Country,
    pub postal_code: PostalCode,
    pub user_id: Option<Uuid>,
}
