use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::error::DomainError;
use pixel_domain::model::{Currency, Description, Money, Product, ProductName};
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;

use crate::{
    command::Command,
    context::AppContext,
    error::AppResult,
    handler::Handler,
    outcome::Outcome,
    request::Request,
    validation::{ValidationError, Validator},
};

/// 创建商品，成功时返回新商品的外部标识
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price_minor: i64,
    pub currency: String,
    pub description: String,
}

impl Request for CreateProduct {
    const NAME: &'static str = "CreateProduct";
    type Response = Uuid;
}

impl Command for CreateProduct {}

pub struct CreateProductValidator;

impl Validator<CreateProduct> for CreateProductValidator {
    fn validate(&self, command: &CreateProduct) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = [
            ValidationError::check("name", &ProductName::new(command.name.as_str())),
            ValidationError::check("description", &Description::new(command.description.as_str())),
        ]
        .into_iter()
        .flatten()
        .collect();

        match Currency::from_code(&command.currency) {
            Ok(currency) => errors.extend(ValidationError::check(
                "price",
                &Money::new(command.price_minor, currency),
            )),
            Err(err) => errors.push(ValidationError::new("currency", err.to_string())),
        }

        errors
    }
}

pub struct CreateProductHandler {
    products: Arc<dyn Repository<Product>>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn Repository<Product>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            products,
            unit_of_work,
        }
    }

    fn build(command: CreateProduct) -> Result<Product, DomainError> {
        let mut product = Product::with_guid(Uuid::new_v4());
        product.name = ProductName::new(command.name);
        product.price = Money::new(command.price_minor, Currency::from_code(&command.currency)?);
        product.description = Description::new(command.description);
        Ok(product)
    }
}

#[async_trait]
impl Handler<CreateProduct> for CreateProductHandler {
    async fn handle(&self, ctx: &AppContext, command: CreateProduct) -> AppResult<Outcome<Uuid>> {
        let cancel = ctx.cancellation();

        // 非法币种以拒绝结果返回
        let product = match Self::build(command) {
            Ok(product) => product,
            Err(err) => return Ok(Outcome::failure(err.to_string())),
        };
        let guid = product.guid();

        if let Err(err) = self.products.add(product, cancel).await {
            return Outcome::settle(err);
        }

        match self.unit_of_work.save_changes(cancel).await {
            Ok(_) => Ok(Outcome::success(guid)),
            Err(err) => Outcome::settle(err),
        }
    }
}
