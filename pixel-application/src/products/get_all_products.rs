use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::model::Product;
use pixel_domain::repository::Repository;

use super::ProductResponse;
use crate::{
    context::AppContext, error::AppResult, handler::Handler, outcome::Outcome, query::Query,
    request::Request,
};

#[derive(Debug, Clone, Default)]
pub struct GetAllProducts;

impl Request for GetAllProducts {
    const NAME: &'static str = "GetAllProducts";
    type Response = Vec<ProductResponse>;
}

impl Query for GetAllProducts {}

pub struct GetAllProductsHandler {
    products: Arc<dyn Repository<Product>>,
}

impl GetAllProductsHandler {
    pub fn new(products: Arc<dyn Repository<Product>>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Handler<GetAllProducts> for GetAllProductsHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        _query: GetAllProducts,
    ) -> AppResult<Outcome<Vec<ProductResponse>>> {
        match self.products.get_all(ctx.cancellation()).await {
            Ok(products) => Ok(Outcome::success(
                products.iter().map(ProductResponse::from).collect(),
            )),
            Err(err) => Outcome::settle(err),
        }
    }
}
