use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::Product;
use serde::{Deserialize, Serialize};

use crate::dto::Dto;

/// 商品对外视图；金额以最小货币单位表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i64,
    pub currency: String,
    pub description: String,
}

impl Dto for ProductResponse {}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.guid(),
            name: product.name.to_string(),
            price_minor: product.price.amount_minor,
            currency: product.price.currency.code().to_string(),
            description: product.description.to_string(),
        }
    }
}
