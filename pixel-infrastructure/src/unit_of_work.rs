use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::error::{DomainError, DomainResult};
use pixel_domain::unit_of_work::UnitOfWork;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::store::{Change, InMemoryStore};

/// 请求级工作单元：缓冲同一作用域内各仓储登记的变更，提交时整体写入存储
#[derive(Debug)]
pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    pending: Mutex<Vec<Change>>,
}

impl InMemoryUnitOfWork {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    pub(crate) async fn stage(&self, change: Change) {
        self.pending.lock().await.push(change);
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn save_changes(&self, cancel: &CancellationToken) -> DomainResult<usize> {
        let changes = std::mem::take(&mut *self.pending.lock().await);
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        if changes.is_empty() {
            return Ok(0);
        }

        let staged = changes.len();
        match self.store.commit(changes, cancel).await {
            Ok(affected) => {
                debug!(affected, "changes committed");
                Ok(affected)
            }
            Err(err) => {
                warn!(staged, error = %err, "commit rejected");
                Err(err)
            }
        }
    }

    async fn discard(&self) {
        self.pending.lock().await.clear();
    }

    async fn pending(&self) -> usize {
        self.pending.lock().await.len()
    }
}
