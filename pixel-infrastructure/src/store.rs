//! 内存存储（InMemoryStore）
//!
//! 以实体类型名为表名，按内部标识有序保存实体的 JSON 载荷：
//! - 读操作只看到已提交状态；
//! - `commit` 在副本上依次应用全部变更，任一失败则整体放弃，全部成功才替换现有状态；
//! - 配置了快照文件时，先落盘再替换，保证文件与内存一致。
//!
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use pixel_domain::entity::Uuid;
use pixel_domain::error::{DomainError, DomainResult};
use pixel_domain::value_object::Version;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 一行已提交的实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredRow {
    pub(crate) id: u64,
    pub(crate) guid: Uuid,
    pub(crate) version: Version,
    pub(crate) payload: serde_json::Value,
}

/// 待提交的单条变更
#[derive(Debug, Clone)]
pub(crate) enum Change {
    Insert {
        table: &'static str,
        guid: Uuid,
        payload: serde_json::Value,
    },
    Update {
        table: &'static str,
        guid: Uuid,
        expected: Version,
        payload: serde_json::Value,
    },
    Delete {
        table: &'static str,
        guid: Uuid,
        expected: Version,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Table {
    next_id: u64,
    rows: BTreeMap<u64, StoredRow>,
    #[serde(skip)]
    index: HashMap<Uuid, u64>,
}

impl Table {
    fn reindex(&mut self) {
        self.index = self.rows.values().map(|row| (row.guid, row.id)).collect();
    }

    fn find(&self, guid: Uuid) -> Option<&StoredRow> {
        self.index.get(&guid).and_then(|id| self.rows.get(id))
    }

    // 定位行并核对版本；行不存在或版本不一致都视为并发冲突
    fn locate(&self, table: &str, guid: Uuid, expected: Version) -> DomainResult<u64> {
        match self.find(guid) {
            Some(row) if row.version == expected => Ok(row.id),
            _ => Err(DomainError::Concurrency {
                entity: table.to_string(),
                guid,
            }),
        }
    }

    fn apply(&mut self, table: &str, change: Change) -> DomainResult<()> {
        match change {
            Change::Insert { guid, payload, .. } => {
                if self.index.contains_key(&guid) {
                    return Err(DomainError::Constraint {
                        reason: format!("{table} with ID {guid} already exists."),
                    });
                }
                self.next_id += 1;
                let id = self.next_id;
                self.rows.insert(
                    id,
                    StoredRow {
                        id,
                        guid,
                        version: Version::initial().next(),
                        payload,
                    },
                );
                self.index.insert(guid, id);
            }
            Change::Update {
                guid,
                expected,
                payload,
                ..
            } => {
                let id = self.locate(table, guid, expected)?;
                if let Some(row) = self.rows.get_mut(&id) {
                    row.version = row.version.next();
                    row.payload = payload;
                }
            }
            Change::Delete { guid, expected, .. } => {
                let id = self.locate(table, guid, expected)?;
                self.rows.remove(&id);
                self.index.remove(&guid);
            }
        }
        Ok(())
    }
}

impl Change {
    fn table(&self) -> &'static str {
        match self {
            Change::Insert { table, .. }
            | Change::Update { table, .. }
            | Change::Delete { table, .. } => *table,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    tables: BTreeMap<String, Table>,
}

/// 进程内共享的实体存储
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    snapshot: Option<PathBuf>,
}

impl InMemoryStore {
    /// 纯内存存储，进程退出即丢失
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 以 JSON 快照文件为后端；文件不存在时从空库开始
    pub async fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let mut state: StoreState = serde_json::from_slice(&bytes)?;
                for table in state.tables.values_mut() {
                    table.reindex();
                }
                state
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), tables = state.tables.len(), "snapshot loaded");
        Ok(Self {
            state: RwLock::new(state),
            snapshot: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    /// 表内已提交的行数
    pub async fn count(&self, table: &str) -> usize {
        let state = self.state.read().await;
        state.tables.get(table).map_or(0, |t| t.rows.len())
    }

    /// 按内部标识升序返回全部行
    pub(crate) async fn rows(&self, table: &str) -> Vec<StoredRow> {
        let state = self.state.read().await;
        state
            .tables
            .get(table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) async fn find(&self, table: &str, guid: Uuid) -> Option<StoredRow> {
        let state = self.state.read().await;
        state.tables.get(table).and_then(|t| t.find(guid)).cloned()
    }

    /// 原子提交一批变更，返回受影响的行数
    pub(crate) async fn commit(
        &self,
        changes: Vec<Change>,
        cancel: &CancellationToken,
    ) -> DomainResult<usize> {
        let mut state = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            guard = self.state.write() => guard,
        };

        let affected = changes.len();
        let mut working = state.clone();
        for change in changes {
            let name = change.table();
            let table = working.tables.entry(name.to_string()).or_default();
            table.apply(name, change)?;
        }

        if let Some(path) = &self.snapshot {
            write_snapshot(path, &working)
                .await
                .map_err(DomainError::into_commit_fault)?;
        }

        *state = working;
        Ok(affected)
    }
}

// 先写临时文件再改名，避免留下半截快照
async fn write_snapshot(path: &Path, state: &StoreState) -> DomainResult<()> {
    let bytes = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn insert(guid: Uuid) -> Change {
        Change::Insert {
            table: "User",
            guid,
            payload: json!({ "email": "a@b.io" }),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_first_version() {
        let store = InMemoryStore::in_memory();
        let cancel = CancellationToken::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let n = store.commit(vec![insert(a), insert(b)], &cancel).await.unwrap();
        assert_eq!(n, 2);

        let rows = store.rows("User").await;
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(rows.iter().all(|r| r.version == Version::from_value(1)));
        assert_eq!(store.find("User", b).await.map(|r| r.id), Some(2));
    }

    #[tokio::test]
    async fn failed_batch_leaves_state_untouched() {
        let store = InMemoryStore::in_memory();
        let cancel = CancellationToken::new();
        let existing = Uuid::new_v4();
        store.commit(vec![insert(existing)], &cancel).await.unwrap();

        let err = store
            .commit(vec![insert(Uuid::new_v4()), insert(existing)], &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Constraint { .. }));
        assert_eq!(store.count("User").await, 1);
    }

    #[tokio::test]
    async fn stale_version_is_a_concurrency_fault() {
        let store = InMemoryStore::in_memory();
        let cancel = CancellationToken::new();
        let guid = Uuid::new_v4();
        store.commit(vec![insert(guid)], &cancel).await.unwrap();

        let update = |expected| Change::Update {
            table: "User",
            guid,
            expected,
            payload: json!({ "email": "c@d.io" }),
        };
        store
            .commit(vec![update(Version::from_value(1))], &cancel)
            .await
            .unwrap();

        let err = store
            .commit(vec![update(Version::from_value(1))], &cancel)
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        let row = store.find("User", guid).await.unwrap();
        assert_eq!(row.version, Version::from_value(2));
        assert_eq!(row.payload["email"], "c@d.io");
    }

    #[tokio::test]
    async fn cancelled_commit_applies_nothing() {
        let store = InMemoryStore::in_memory();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = store
            .commit(vec![insert(Uuid::new_v4())], &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert_eq!(store.count("User").await, 0);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.json");
        let guid = Uuid::new_v4();

        {
            let store = InMemoryStore::open(&path).await.unwrap();
            store
                .commit(vec![insert(guid)], &CancellationToken::new())
                .await
                .unwrap();
        }

        let reopened = InMemoryStore::open(&path).await.unwrap();
        assert_eq!(reopened.count("User").await, 1);
        assert_eq!(reopened.find("User", guid).await.map(|r| r.id), Some(1));
        assert_eq!(reopened.snapshot_path(), Some(path.as_path()));
    }
}
