//! 缓存端口
//!
//! 以字节为单位的键值缓存，带可选过期时间；`CacheExt` 在其上提供 JSON 读写。
//! 缓存只作加速用途，读写失败不影响请求结果。
//!
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// 未指定过期时间时使用的默认值
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// 缓存后端不可用
    #[error("cache backend failure: {message}")]
    Backend { message: String },
    /// 缓存内容序列化/反序列化失败
    #[error("cache serialization failed: {message}")]
    Serialization { message: String },
}

impl CacheError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// `ttl` 为空时使用 [`DEFAULT_EXPIRATION`]
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}

#[async_trait]
pub trait CacheExt: Cache {
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.get(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| CacheError::serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn set_json<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<(), CacheError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let bytes =
            serde_json::to_vec(value).map_err(|e| CacheError::serialization(e.to_string()))?;
        self.set(key, bytes, ttl).await
    }
}

impl<C> CacheExt for C where C: Cache + ?Sized {}
