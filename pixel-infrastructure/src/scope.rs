use std::sync::Arc;

use pixel_application::scope::{RequestScope, ScopeFactory};
use pixel_domain::model::{Address, Customer, Order, OrderItem, Product, User};
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;

use crate::repository::InMemoryRepository;
use crate::store::InMemoryStore;
use crate::unit_of_work::InMemoryUnitOfWork;

/// 每次调用都基于共享存储创建新的工作单元与仓储
#[derive(Debug, Clone)]
pub struct InMemoryScopeFactory {
    store: Arc<InMemoryStore>,
}

impl InMemoryScopeFactory {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    /// 具体类型的作用域，供种子数据等内部流程使用
    pub fn scope(&self) -> InMemoryScope {
        InMemoryScope::new(self.store.clone())
    }
}

impl ScopeFactory for InMemoryScopeFactory {
    fn create_scope(&self) -> Arc<dyn RequestScope> {
        Arc::new(self.scope())
    }
}

/// 同一作用域内的仓储共享一个工作单元
pub struct InMemoryScope {
    uow: Arc<InMemoryUnitOfWork>,
    users: Arc<InMemoryRepository<User>>,
    products: Arc<InMemoryRepository<Product>>,
    orders: Arc<InMemoryRepository<Order>>,
    order_items: Arc<InMemoryRepository<OrderItem>>,
    addresses: Arc<InMemoryRepository<Address>>,
    customers: Arc<InMemoryRepository<Customer>>,
}

impl InMemoryScope {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        let uow = Arc::new(InMemoryUnitOfWork::new(store));
        Self {
            users: Arc::new(InMemoryRepository::new(uow.clone())),
            products: Arc::new(InMemoryRepository::new(uow.clone())),
            orders: Arc::new(InMemoryRepository::new(uow.clone())),
            order_items: Arc::new(InMemoryRepository::new(uow.clone())),
            addresses: Arc::new(InMemoryRepository::new(uow.clone())),
            customers: Arc::new(InMemoryRepository::new(uow.clone())),
            uow,
        }
    }
}

impl RequestScope for InMemoryScope {
    fn unit_of_work(&self) -> Arc<dyn UnitOfWork> {
        self.uow.clone()
    }

    fn users(&self) -> Arc<dyn Repository<User>> {
        self.users.clone()
    }

    fn products(&self) -> Arc<dyn Repository<Product>> {
        self.products.clone()
    }

    fn orders(&self) -> Arc<dyn Repository<Order>> {
        self.orders.clone()
    }

    fn order_items(&self) -> Arc<dyn Repository<OrderItem>> {
        self.order_items.clone()
    }

    fn addresses(&self) -> Arc<dyn Repository<Address>> {
        self.addresses.clone()
    }

    fn customers(&self) -> Arc<dyn Repository<Customer>> {
        self.customers.clone()
    }
}
