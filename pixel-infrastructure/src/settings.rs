//! 存储提供方配置
//!
//! 启动时按名称选择提供方；未知名称直接拒绝，不做回退。
//!
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use pixel_domain::error::DomainError;
use thiserror::Error;
use tracing::info;

use crate::store::InMemoryStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// 纯内存
    #[default]
    Memory,
    /// 内存 + JSON 快照文件，连接串为文件路径
    File,
}

impl DatabaseProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseProvider::Memory => "memory",
            DatabaseProvider::File => "file",
        }
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseProvider {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Ok(DatabaseProvider::Memory),
            "file" | "json" => Ok(DatabaseProvider::File),
            _ => Err(SettingsError::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unsupported database provider: {provider}")]
    UnsupportedProvider { provider: String },
    #[error("a connection string is required for the '{provider}' provider")]
    MissingConnectionString { provider: DatabaseProvider },
    #[error("snapshot directory does not exist: {}", path.display())]
    SnapshotDirectory { path: PathBuf },
    #[error(transparent)]
    Store(#[from] DomainError),
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseSettings {
    pub provider: DatabaseProvider,
    pub connection_string: Option<String>,
}

impl DatabaseSettings {
    /// 由原始字符串解析配置；空白连接串视为未配置
    pub fn parse(provider: &str, connection_string: Option<String>) -> Result<Self, SettingsError> {
        Ok(Self {
            provider: provider.parse()?,
            connection_string: connection_string.filter(|c| !c.trim().is_empty()),
        })
    }
}

impl InMemoryStore {
    /// 按配置打开存储
    pub async fn connect(settings: &DatabaseSettings) -> Result<Arc<Self>, SettingsError> {
        let store = match settings.provider {
            DatabaseProvider::Memory => Self::in_memory(),
            DatabaseProvider::File => {
                let path = settings.connection_string.as_deref().ok_or(
                    SettingsError::MissingConnectionString {
                        provider: settings.provider,
                    },
                )?;
                ensure_snapshot_dir(Path::new(path)).await?;
                Self::open(path).await?
            }
        };
        info!(provider = %settings.provider, "database connected");
        Ok(Arc::new(store))
    }
}

// 快照目录缺失时首次提交才会失败，启动期即拒绝
async fn ensure_snapshot_dir(path: &Path) -> Result<(), SettingsError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(()),
    };
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(SettingsError::SnapshotDirectory {
            path: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_are_case_insensitive() {
        assert_eq!("Memory".parse::<DatabaseProvider>().unwrap(), DatabaseProvider::Memory);
        assert_eq!(" FILE ".parse::<DatabaseProvider>().unwrap(), DatabaseProvider::File);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = DatabaseSettings::parse("oracle", None).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported database provider: oracle");
    }

    #[tokio::test]
    async fn file_provider_requires_connection_string() {
        let settings = DatabaseSettings::parse("file", Some("  ".into())).unwrap();
        let err = InMemoryStore::connect(&settings).await.unwrap_err();
        assert!(matches!(err, SettingsError::MissingConnectionString { .. }));
    }

    #[tokio::test]
    async fn file_provider_opens_snapshot_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let settings =
            DatabaseSettings::parse("file", Some(path.display().to_string())).unwrap();

        let store = InMemoryStore::connect(&settings).await.unwrap();
        assert_eq!(store.snapshot_path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn missing_snapshot_directory_is_rejected_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let path = missing.join("store.json");
        let settings =
            DatabaseSettings::parse("file", Some(path.display().to_string())).unwrap();

        let err = InMemoryStore::connect(&settings).await.unwrap_err();
        match err {
            SettingsError::SnapshotDirectory { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn snapshot_parent_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        tokio::fs::write(&file, b"x").await.unwrap();
        let settings = DatabaseSettings::parse(
            "file",
            Some(file.join("store.json").display().to_string()),
        )
        .unwrap();

        let err = InMemoryStore::connect(&settings).await.unwrap_err();
        assert!(matches!(err, SettingsError::SnapshotDirectory { .. }));
    }
}
