use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::Product;
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;
use tracing::warn;

use super::product_cache_key;
use crate::{
    caching::Cache,
    command::Command,
    context::AppContext,
    error::AppResult,
    handler::Handler,
    outcome::Outcome,
    request::Request,
    validation::{ValidationError, Validator},
};

#[derive(Debug, Clone)]
pub struct DeleteProductById {
    pub product_id: Uuid,
}

impl Request for DeleteProductById {
    const NAME: &'static str = "DeleteProductById";
    type Response = bool;
}

impl Command for DeleteProductById {}

pub struct DeleteProductByIdValidator;

impl Validator<DeleteProductById> for DeleteProductByIdValidator {
    fn validate(&self, command: &DeleteProductById) -> Vec<ValidationError> {
        if command.product_id.is_nil() {
            return vec![ValidationError::new("product_id", "must not be empty")];
        }
        Vec::new()
    }
}

/// 删除商品并在提交成功后清除缓存
pub struct DeleteProductByIdHandler {
    products: Arc<dyn Repository<Product>>,
    unit_of_work: Arc<dyn UnitOfWork>,
    cache: Arc<dyn Cache>,
}

impl DeleteProductByIdHandler {
    pub fn new(
        products: Arc<dyn Repository<Product>>,
        unit_of_work: Arc<dyn UnitOfWork>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            products,
            unit_of_work,
            cache,
        }
    }
}

#[async_trait]
impl Handler<DeleteProductById> for DeleteProductByIdHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        command: DeleteProductById,
    ) -> AppResult<Outcome<bool>> {
        let cancel = ctx.cancellation();

        match self.products.get_by_id(command.product_id, cancel).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(Outcome::entity_not_found(Product::TYPE, command.product_id));
            }
            Err(err) => return Outcome::settle(err),
        }

        if let Err(err) = self.products.delete_by_id(command.product_id, cancel).await {
            return Outcome::settle(err);
        }

        if let Err(err) = self.unit_of_work.save_changes(cancel).await {
            return Outcome::settle(err);
        }

        let key = product_cache_key(command.product_id);
        if let Err(err) = self.cache.remove(&key).await {
            warn!(key = %key, error = %err, "product cache eviction failed");
        }

        Ok(Outcome::success(true))
    }
}
