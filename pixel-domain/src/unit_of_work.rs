//! 工作单元（Unit of Work）
//!
//! 每个请求独享一个工作单元，缓冲仓储登记的变更并在 `save_changes` 时原子提交。
//!
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::DomainResult;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// 原子提交全部已登记变更，返回受影响的行数
    ///
    /// - 外部标识重复：`DomainError::Constraint`
    /// - 行版本不一致或行已被删除：`DomainError::Concurrency`
    ///
    /// 无论成功与否，已登记的变更都会被清空。
    async fn save_changes(&self, cancel: &CancellationToken) -> DomainResult<usize>;

    /// 丢弃尚未提交的变更
    async fn discard(&self);

    /// 尚未提交的变更数量
    async fn pending(&self) -> usize;
}

#[async_trait]
impl<T> UnitOfWork for Arc<T>
where
    T: UnitOfWork + ?Sized,
{
    async fn save_changes(&self, cancel: &CancellationToken) -> DomainResult<usize> {
        (**self).save_changes(cancel).await
    }

    async fn discard(&self) {
        (**self).discard().await
    }

    async fn pending(&self) -> usize {
        (**self).pending().await
    }
}
