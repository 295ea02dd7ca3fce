use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::Product;
use pixel_domain::repository::Repository;
use tracing::warn;

use super::{ProductResponse, product_cache_key};
use crate::{
    caching::{Cache, CacheExt},
    context::AppContext,
    error::AppResult,
    handler::Handler,
    outcome::Outcome,
    query::Query,
    request::Request,
};

#[derive(Debug, Clone)]
pub struct GetProductById {
    pub product_id: Uuid,
}

impl Request for GetProductById {
    const NAME: &'static str = "GetProductById";
    type Response = ProductResponse;
}

impl Query for GetProductById {}

/// 读穿缓存：命中直接返回，未命中查询仓储后回填（默认过期时间）
pub struct GetProductByIdHandler {
    products: Arc<dyn Repository<Product>>,
    cache: Arc<dyn Cache>,
}

impl GetProductByIdHandler {
    pub fn new(products: Arc<dyn Repository<Product>>, cache: Arc<dyn Cache>) -> Self {
        Self { products, cache }
    }
}

#[async_trait]
impl Handler<GetProductById> for GetProductByIdHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        query: GetProductById,
    ) -> AppResult<Outcome<ProductResponse>> {
        let key = product_cache_key(query.product_id);

        match self.cache.get_json::<ProductResponse>(&key).await {
            Ok(Some(cached)) => return Ok(Outcome::success(cached)),
            Ok(None) => {}
            Err(err) => warn!(key = %key, error = %err, "product cache read failed"),
        }

        let product = match self.products.get_by_id(query.product_id, ctx.cancellation()).await {
            Ok(Some(product)) => product,
            Ok(None) => return Ok(Outcome::entity_not_found(Product::TYPE, query.product_id)),
            Err(err) => return Outcome::settle(err),
        };

        let response = ProductResponse::from(&product);
        if let Err(err) = self.cache.set_json(&key, &response, None).await {
            warn!(key = %key, error = %err, "product cache write failed");
        }

        Ok(Outcome::success(response))
    }
}
