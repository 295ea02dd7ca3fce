//! 请求作用域（Request Scope）
//!
//! 每次调度创建一个作用域：一个全新的工作单元，以及共享该工作单元的各实体仓储。
//! 作用域在请求结束时随处理器一起释放，未提交的变更随之丢弃。
//!
use std::sync::Arc;

use pixel_domain::model::{Address, Customer, Order, OrderItem, Product, User};
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;

pub trait RequestScope: Send + Sync {
    fn unit_of_work(&self) -> Arc<dyn UnitOfWork>;

    fn users(&self) -> Arc<dyn Repository<User>>;

    fn products(&self) -> Arc<dyn Repository<Product>>;

    fn orders(&self) -> Arc<dyn Repository<Order>>;

    fn order_items(&self) -> Arc<dyn Repository<OrderItem>>;

    fn addresses(&self) -> Arc<dyn Repository<Address>>;

    fn customers(&self) -> Arc<dyn Repository<Customer>>;
}

/// 作用域工厂，由基础设施层提供
pub trait ScopeFactory: Send + Sync {
    fn create_scope(&self) -> Arc<dyn RequestScope>;
}
