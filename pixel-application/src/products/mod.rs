//! 商品用例
//!
mod create_product;
mod delete_product_by_id;
mod dto;
mod get_all_products;
mod get_product_by_id;

pub use create_product::{CreateProduct, CreateProductHandler, CreateProductValidator};
pub use delete_product_by_id::{
    DeleteProductById, DeleteProductByIdHandler, DeleteProductByIdValidator,
};
pub use dto::ProductResponse;
pub use get_all_products::{GetAllProducts, GetAllProductsHandler};
pub use get_product_by_id::{GetProductById, GetProductByIdHandler};

use pixel_domain::entity::Uuid;

/// 单个商品视图的缓存键
pub fn product_cache_key(guid: Uuid) -> String {
    format!("product:{guid}")
}
