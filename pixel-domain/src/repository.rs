//! 通用仓储抽象
//!
//! 对所有实体类型提供一致的 CRUD 语义：
//! - 读操作直接反映已提交状态
//! - `add / update / delete_by_id` 仅登记变更，由 `UnitOfWork::save_changes` 统一提交
//! - `update / delete_by_id` 按外部标识重新定位，不存在时返回 `DomainError::NotFound`
//!
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::DomainResult;

#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity,
{
    async fn get_all(&self, cancel: &CancellationToken) -> DomainResult<Vec<E>>;

    async fn get_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<Option<E>>;

    async fn add(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()>;

    async fn update(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()>;

    async fn delete_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<()>;

    async fn any(&self, cancel: &CancellationToken) -> DomainResult<bool>;
}

#[async_trait]
impl<E, T> Repository<E> for Arc<T>
where
    E: Entity,
    T: Repository<E> + ?Sized,
{
    async fn get_all(&self, cancel: &CancellationToken) -> DomainResult<Vec<E>> {
        (**self).get_all(cancel).await
    }

    async fn get_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<Option<E>> {
        (**self).get_by_id(guid, cancel).await
    }

    async fn add(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()> {
        (**self).add(entity, cancel).await
    }

    async fn update(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()> {
        (**self).update(entity, cancel).await
    }

    async fn delete_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<()> {
        (**self).delete_by_id(guid, cancel).await
    }

    async fn any(&self, cancel: &CancellationToken) -> DomainResult<bool> {
        (**self).any(cancel).await
    }
}
