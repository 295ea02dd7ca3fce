//! 单元测试用的内存替身
//!
//! 仓储在登记时立即生效，工作单元只计数；真实的暂存/提交语义由基础设施层测试覆盖。
//!
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::error::{DomainError, DomainResult};
use pixel_domain::model::{Address, Customer, Order, OrderItem, Product, User};
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;
use tokio_util::sync::CancellationToken;

use crate::caching::{Cache, CacheError};
use crate::scope::{RequestScope, ScopeFactory};

type ErrorFactory = Box<dyn Fn() -> DomainError + Send + Sync>;

pub(crate) struct FakeRepository<E> {
    rows: Mutex<Vec<E>>,
    fail_reads: Mutex<Option<ErrorFactory>>,
}

impl<E: Entity> Default for FakeRepository<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_reads: Mutex::new(None),
        }
    }
}

impl<E: Entity> FakeRepository<E> {
    pub(crate) fn seed(&self, entity: E) {
        self.rows.lock().unwrap().push(entity);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub(crate) fn fail_reads_with(&self, f: impl Fn() -> DomainError + Send + Sync + 'static) {
        *self.fail_reads.lock().unwrap() = Some(Box::new(f));
    }

    fn check(&self) -> DomainResult<()> {
        match self.fail_reads.lock().unwrap().as_ref() {
            Some(f) => Err(f()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for FakeRepository<E> {
    async fn get_all(&self, _cancel: &CancellationToken) -> DomainResult<Vec<E>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_by_id(&self, guid: Uuid, _cancel: &CancellationToken) -> DomainResult<Option<E>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.guid() == guid)
            .cloned())
    }

    async fn add(&self, entity: E, _cancel: &CancellationToken) -> DomainResult<()> {
        self.rows.lock().unwrap().push(entity);
        Ok(())
    }

    async fn update(&self, entity: E, _cancel: &CancellationToken) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|e| e.guid() == entity.guid()) {
            Some(row) => {
                *row = entity;
                Ok(())
            }
            None => Err(DomainError::not_found(E::TYPE, entity.guid())),
        }
    }

    async fn delete_by_id(&self, guid: Uuid, _cancel: &CancellationToken) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.guid() != guid);
        if rows.len() == before {
            return Err(DomainError::not_found(E::TYPE, guid));
        }
        Ok(())
    }

    async fn any(&self, _cancel: &CancellationToken) -> DomainResult<bool> {
        self.check()?;
        Ok(!self.rows.lock().unwrap().is_empty())
    }
}

#[derive(Default)]
pub(crate) struct FakeUnitOfWork {
    commits: AtomicUsize,
    fail_commit: Mutex<Option<ErrorFactory>>,
}

impl FakeUnitOfWork {
    pub(crate) fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_commit_with(&self, f: impl Fn() -> DomainError + Send + Sync + 'static) {
        *self.fail_commit.lock().unwrap() = Some(Box::new(f));
    }
}

#[async_trait]
impl UnitOfWork for FakeUnitOfWork {
    async fn save_changes(&self, _cancel: &CancellationToken) -> DomainResult<usize> {
        if let Some(f) = self.fail_commit.lock().unwrap().as_ref() {
            return Err(f());
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn discard(&self) {}

    async fn pending(&self) -> usize {
        0
    }
}

/// 所有作用域共享同一组替身，便于断言
#[derive(Default, Clone)]
pub(crate) struct FakeScope {
    pub(crate) uow: Arc<FakeUnitOfWork>,
    pub(crate) users: Arc<FakeRepository<User>>,
    pub(crate) products: Arc<FakeRepository<Product>>,
    pub(crate) orders: Arc<FakeRepository<Order>>,
    pub(crate) order_items: Arc<FakeRepository<OrderItem>>,
    pub(crate) addresses: Arc<FakeRepository<Address>>,
    pub(crate) customers: Arc<FakeRepository<Customer>>,
}

impl RequestScope for FakeScope {
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

#[derive(Default)]
pub(crate) struct FakeScopes {
    pub(crate) scope: FakeScope,
    created: AtomicUsize,
}

impl FakeScopes {
    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ScopeFactory for FakeScopes {
    fn create_scope(&self) -> Arc<dyn RequestScope> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(self.scope.clone())
    }
}

/// 不过期的缓存替身；`broken` 时所有操作返回后端错误
#[derive(Default)]
pub(crate) struct FakeCache {
    pub(crate) entries: DashMap<String, Vec<u8>>,
    pub(crate) broken: std::sync::atomic::AtomicBool,
}

impl FakeCache {
    fn ensure_up(&self) -> Result<(), CacheError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheError::backend("cache offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for FakeCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.ensure_up()?;
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, _ttl: Option<Duration>) -> Result<(), CacheError> {
        self.ensure_up()?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.ensure_up()?;
        self.entries.remove(key);
        Ok(())
    }
}

/// 捕获 tracing 事件的级别与字段
#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub(crate) level: tracing::Level,
    fields: std::collections::HashMap<String, String>,
}

impl Captured {
    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 完成记录：开始记录之外的请求日志
    pub(crate) fn is_completion(&self) -> bool {
        self.field("message")
            .map(|m| !m.starts_with("Starting"))
            .unwrap_or(false)
    }
}

#[derive(Clone, Default)]
pub(crate) struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

impl CaptureLayer {
    pub(crate) fn records(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn completions(&self) -> Vec<Captured> {
        self.records()
            .into_iter()
            .filter(Captured::is_completion)
            .collect()
    }
}

#[derive(Default)]
struct FieldVisitor(std::collections::HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

/// 在当前线程安装捕获订阅者，guard 释放后恢复
pub(crate) fn capture() -> (CaptureLayer, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;

    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (layer, guard)
}
