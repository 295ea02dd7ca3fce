//! 基于 [`InMemoryStore`] 的通用仓储
//!
//! 读操作直接查询已提交状态；写操作序列化实体后交给所属工作单元暂存，
//! 直到 `save_changes` 才真正生效。
//!
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::error::{DomainError, DomainResult};
use pixel_domain::repository::Repository;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::store::{Change, InMemoryStore, StoredRow};
use crate::unit_of_work::InMemoryUnitOfWork;

pub struct InMemoryRepository<E> {
    uow: Arc<InMemoryUnitOfWork>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> InMemoryRepository<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    pub fn new(uow: Arc<InMemoryUnitOfWork>) -> Self {
        Self {
            uow,
            _entity: PhantomData,
        }
    }

    fn store(&self) -> &InMemoryStore {
        self.uow.store()
    }

    fn decode(row: StoredRow) -> DomainResult<E> {
        let mut entity: E = serde_json::from_value(row.payload)?;
        if entity.guid() != row.guid {
            return Err(DomainError::TypeMismatch {
                expected: row.guid.to_string(),
                found: entity.guid().to_string(),
            });
        }
        entity.restore(row.id, row.version);
        Ok(entity)
    }

    // 按外部标识定位已提交的行
    async fn resolve(&self, guid: Uuid) -> DomainResult<StoredRow> {
        self.store()
            .find(E::TYPE, guid)
            .await
            .ok_or_else(|| DomainError::not_found(E::TYPE, guid))
    }
}

fn ensure_active(cancel: &CancellationToken) -> DomainResult<()> {
    if cancel.is_cancelled() {
        return Err(DomainError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    async fn get_all(&self, cancel: &CancellationToken) -> DomainResult<Vec<E>> {
        ensure_active(cancel)?;
        self.store()
            .rows(E::TYPE)
            .await
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    async fn get_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<Option<E>> {
        ensure_active(cancel)?;
        self.store()
            .find(E::TYPE, guid)
            .await
            .map(Self::decode)
            .transpose()
    }

    async fn add(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()> {
        ensure_active(cancel)?;
        let payload = serde_json::to_value(&entity)?;
        self.uow
            .stage(Change::Insert {
                table: E::TYPE,
                guid: entity.guid(),
                payload,
            })
            .await;
        Ok(())
    }

    async fn update(&self, entity: E, cancel: &CancellationToken) -> DomainResult<()> {
        ensure_active(cancel)?;
        let guid = entity.guid();
        self.resolve(guid).await?;
        let payload = serde_json::to_value(&entity)?;
        self.uow
            .stage(Change::Update {
                table: E::TYPE,
                guid,
                expected: entity.version(),
                payload,
            })
            .await;
        Ok(())
    }

    async fn delete_by_id(&self, guid: Uuid, cancel: &CancellationToken) -> DomainResult<()> {
        ensure_active(cancel)?;
        let row = self.resolve(guid).await?;
        self.uow
            .stage(Change::Delete {
                table: E::TYPE,
                guid,
                expected: row.version,
            })
            .await;
        Ok(())
    }

    async fn any(&self, cancel: &CancellationToken) -> DomainResult<bool> {
        ensure_active(cancel)?;
        Ok(self.store().count(E::TYPE).await > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_domain::model::{Email, FirstName, LastName, User};
    use pixel_domain::unit_of_work::UnitOfWork;
    use pixel_domain::value_object::Version;

    fn user(email: &str) -> User {
        let mut user = User::with_guid(Uuid::new_v4());
        user.first_name = FirstName::new("Ada");
        user.last_name = LastName::new("Lovelace");
        user.email = Email::new(email);
        user
    }

    fn repo(store: &Arc<InMemoryStore>) -> (Arc<InMemoryUnitOfWork>, InMemoryRepository<User>) {
        let uow = Arc::new(InMemoryUnitOfWork::new(store.clone()));
        (uow.clone(), InMemoryRepository::new(uow))
    }

    #[tokio::test]
    async fn add_is_invisible_until_committed() {
        let store = Arc::new(InMemoryStore::in_memory());
        let (uow, users) = repo(&store);
        let cancel = CancellationToken::new();
        let ada = user("ada@example.com");
        let guid = ada.guid();

        users.add(ada, &cancel).await.unwrap();
        assert!(users.get_by_id(guid, &cancel).await.unwrap().is_none());
        assert!(!users.any(&cancel).await.unwrap());

        uow.save_changes(&cancel).await.unwrap();

        let loaded = users.get_by_id(guid, &cancel).await.unwrap().unwrap();
        assert_eq!(loaded.id(), 1);
        assert_eq!(loaded.version(), Version::from_value(1));
        assert_eq!(loaded.email.value(), "ada@example.com");
        assert!(users.any(&cancel).await.unwrap());
    }

    #[tokio::test]
    async fn get_all_returns_rows_in_id_order() {
        let store = Arc::new(InMemoryStore::in_memory());
        let (uow, users) = repo(&store);
        let cancel = CancellationToken::new();

        for email in ["a@x.io", "b@x.io", "c@x.io"] {
            users.add(user(email), &cancel).await.unwrap();
        }
        uow.save_changes(&cancel).await.unwrap();

        let all = users.get_all(&cancel).await.unwrap();
        let ids: Vec<u64> = all.iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(all[2].email.value(), "c@x.io");
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_guid_are_not_found() {
        let store = Arc::new(InMemoryStore::in_memory());
        let (uow, users) = repo(&store);
        let cancel = CancellationToken::new();
        let ghost = user("ghost@x.io");
        let guid = ghost.guid();

        let err = users.update(ghost, &cancel).await.unwrap_err();
        assert_eq!(err.to_string(), format!("User with ID {guid} not found."));

        let err = users.delete_by_id(guid, &cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
        assert_eq!(uow.pending().await, 0);
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let store = Arc::new(InMemoryStore::in_memory());
        let (uow, users) = repo(&store);
        let cancel = CancellationToken::new();
        let ada = user("ada@example.com");
        let guid = ada.guid();
        users.add(ada, &cancel).await.unwrap();
        uow.save_changes(&cancel).await.unwrap();

        let mut loaded = users.get_by_id(guid, &cancel).await.unwrap().unwrap();
        loaded.email = Email::new("countess@example.com");
        users.update(loaded, &cancel).await.unwrap();
        uow.save_changes(&cancel).await.unwrap();

        let reloaded = users.get_by_id(guid, &cancel).await.unwrap().unwrap();
        assert_eq!(reloaded.version(), Version::from_value(2));
        assert_eq!(reloaded.email.value(), "countess@example.com");
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_reads() {
        let store = Arc::new(InMemoryStore::in_memory());
        let (_uow, users) = repo(&store);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = users.get_all(&cancel).await.unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
    }
}
