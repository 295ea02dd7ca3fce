//! 目录种子数据
//!
//! 用固定种子的随机源生成用户与商品，再生成引用其内部标识的客户、地址、订单与订单项。
//! 内部标识在提交时才分配，因此按依赖顺序分批提交。已有用户时整体跳过。
//!
use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::internet::raw::SafeEmail;
use fake::faker::lorem::raw::{Sentence, Words};
use fake::faker::name::raw::{FirstName as FakeFirstName, LastName as FakeLastName};
use fake::locales::EN;
use pixel_application::scope::RequestScope;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::error::DomainResult;
use pixel_domain::model::{
    Address, City, Country, Currency, Customer, Description, Email, FirstName, LastName, Money,
    Order, OrderItem, PostalCode, Product, ProductName, Quantity, State, Street, User,
};
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::scope::InMemoryScope;
use crate::store::InMemoryStore;

/// 默认生成的用户/商品数量
pub const DEFAULT_ITEMS_TO_GENERATE: usize = 15;

const DEFAULT_RNG_SEED: u64 = 0x5049_5845_4C53;

/// 单价区间（最小货币单位）
const MIN_PRICE_MINOR: i64 = 500;
const MAX_PRICE_MINOR: i64 = 10_000;

const MAX_ITEMS_PER_ORDER: usize = 3;
const MAX_ORDER_AGE_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    pub count: usize,
    pub rng_seed: u64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_ITEMS_TO_GENERATE,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// 各表写入的行数；`skipped` 表示已有数据未做任何写入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub skipped: bool,
    pub users: usize,
    pub products: usize,
    pub customers: usize,
    pub addresses: usize,
    pub orders: usize,
    pub order_items: usize,
}

pub async fn seed_catalog(
    store: &Arc<InMemoryStore>,
    options: SeedOptions,
    cancel: &CancellationToken,
) -> DomainResult<SeedReport> {
    let scope = InMemoryScope::new(store.clone());
    if scope.users().any(cancel).await? {
        info!("catalog already seeded, skipping");
        return Ok(SeedReport {
            skipped: true,
            ..SeedReport::default()
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.rng_seed);
    let uow = scope.unit_of_work();
    let mut report = SeedReport::default();

    for _ in 0..options.count {
        scope.products().add(fake_product(&mut rng), cancel).await?;
        scope.users().add(fake_user(&mut rng), cancel).await?;
    }
    report.products = options.count;
    report.users = options.count;
    uow.save_changes(cancel).await?;

    // 客户与地址引用已提交用户的外部标识
    let users = scope.users().get_all(cancel).await?;
    for user in &users {
        let mut customer = Customer::with_guid(Uuid::from_u128(rng.random()));
        customer.user_id = Some(user.guid());
        customer.email = user.email.clone();
        scope.customers().add(customer, cancel).await?;
        scope
            .addresses()
            .add(fake_address(&mut rng, user.guid()), cancel)
            .await?;
    }
    report.customers = users.len();
    report.addresses = users.len();
    uow.save_changes(cancel).await?;

    let customers = scope.customers().get_all(cancel).await?;
    for customer in &customers {
        let mut order = Order::with_guid(Uuid::from_u128(rng.random()));
        order.customer_id = customer.id();
        order.order_date = Utc::now() - TimeDelta::days(rng.random_range(0..MAX_ORDER_AGE_DAYS));
        scope.orders().add(order, cancel).await?;
    }
    report.orders = customers.len();
    uow.save_changes(cancel).await?;

    let orders = scope.orders().get_all(cancel).await?;
    let products = scope.products().get_all(cancel).await?;
    if !products.is_empty() {
        for order in &orders {
            for _ in 0..rng.random_range(1..=MAX_ITEMS_PER_ORDER) {
                let product = &products[rng.random_range(0..products.len())];
                let mut item = OrderItem::with_guid(Uuid::from_u128(rng.random()));
                item.order_id = order.id();
                item.product_id = product.id();
                item.quantity = Quantity::new(rng.random_range(1..=5_u32));
                item.unit_price = product.price;
                scope.order_items().add(item, cancel).await?;
                report.order_items += 1;
            }
        }
        uow.save_changes(cancel).await?;
    }

    info!(
        users = report.users,
        products = report.products,
        orders = report.orders,
        order_items = report.order_items,
        "catalog seeded"
    );
    Ok(report)
}

fn fake_user(rng: &mut ChaCha8Rng) -> User {
    let first: String = FakeFirstName(EN).fake_with_rng(rng);
    let last: String = FakeLastName(EN).fake_with_rng(rng);
    let email: String = SafeEmail(EN).fake_with_rng(rng);

    let mut user = User::with_guid(Uuid::from_u128(rng.random()));
    user.first_name = FirstName::new(first);
    user.last_name = LastName::new(last);
    user.email = Email::new(email);
    user
}

fn fake_product(rng: &mut ChaCha8Rng) -> Product {
    let words: Vec<String> = Words(EN, 2..4).fake_with_rng(rng);
    let description: String = Sentence(EN, 6..12).fake_with_rng(rng);
    let currency = Currency::ALL[rng.random_range(0..Currency::ALL.len())];

    let mut product = Product::with_guid(Uuid::from_u128(rng.random()));
    product.name = ProductName::new(title_case(&words));
    product.price = Money::new(rng.random_range(MIN_PRICE_MINOR..=MAX_PRICE_MINOR), currency);
    product.description = Description::new(description);
    product
}

fn fake_address(rng: &mut ChaCha8Rng, user_id: Uuid) -> Address {
    let number: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateName(EN).fake_with_rng(rng);
    let country: String = CountryName(EN).fake_with_rng(rng);
    let postal_code: String = ZipCode(EN).fake_with_rng(rng);

    let mut address = Address::with_guid(Uuid::from_u128(rng.random()));
    address.street = Street::new(format!("{number} {street}"));
    address.city = City::new(city);
    address.state = State::new(state);
    address.country = Country::new(country);
    address.postal_code = PostalCode::new(postal_code);
    address.user_id = Some(user_id);
    address
}

fn title_case(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_domain::value_object::ValueObject;

    #[tokio::test]
    async fn seeds_every_table_with_valid_entities() {
        let store = Arc::new(InMemoryStore::in_memory());
        let cancel = CancellationToken::new();
        let options = SeedOptions {
            count: 4,
            ..SeedOptions::default()
        };

        let report = seed_catalog(&store, options, &cancel).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report.users, 4);
        assert_eq!(store.count(User::TYPE).await, 4);
        assert_eq!(store.count(Product::TYPE).await, 4);
        assert_eq!(store.count(Customer::TYPE).await, 4);
        assert_eq!(store.count(Address::TYPE).await, 4);
        assert_eq!(store.count(Order::TYPE).await, 4);
        assert_eq!(store.count(OrderItem::TYPE).await, report.order_items);
        assert!(report.order_items >= 4);

        let scope = InMemoryScope::new(store.clone());
        for user in scope.users().get_all(&cancel).await.unwrap() {
            assert!(user.email.validate().is_ok(), "{}", user.email);
            assert!(user.first_name.validate().is_ok());
        }
        for product in scope.products().get_all(&cancel).await.unwrap() {
            assert!(product.price.validate().is_ok());
            assert!(product.name.validate().is_ok());
        }
        let customer_ids: Vec<u64> = scope
            .customers()
            .get_all(&cancel)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id())
            .collect();
        for order in scope.orders().get_all(&cancel).await.unwrap() {
            assert!(customer_ids.contains(&order.customer_id));
        }
    }

    #[tokio::test]
    async fn second_run_is_skipped() {
        let store = Arc::new(InMemoryStore::in_memory());
        let cancel = CancellationToken::new();

        seed_catalog(&store, SeedOptions::default(), &cancel).await.unwrap();
        let again = seed_catalog(&store, SeedOptions::default(), &cancel).await.unwrap();

        assert!(again.skipped);
        assert_eq!(store.count(User::TYPE).await, DEFAULT_ITEMS_TO_GENERATE);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        let words = vec!["pixel".to_string(), "lamp".to_string()];
        assert_eq!(title_case(&words), "Pixel Lamp");
    }
}
