//! 领域层统一错误定义
//!
//! 覆盖序列化、取值校验、仓储查找与提交阶段（并发/约束）等最小必要集合，
//! 各实现层统一转换为 `DomainError`。
//!
use thiserror::Error;
use uuid::Uuid;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 领域规则 ---
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    // --- 仓储/持久化 ---
    #[error("{entity} with ID {guid} not found.")]
    NotFound { entity: &'static str, guid: Uuid },
    #[error("A database concurrency error occurred: {entity} with ID {guid} was changed or removed.")]
    Concurrency { entity: String, guid: Uuid },
    #[error("An error occurred while updating the database: {reason}")]
    Constraint { reason: String },
    #[error("An error occurred while updating the database: {reason}")]
    Commit { reason: String },
    #[error("database error: {reason}")]
    Database { reason: String },

    // --- 通用 ---
    #[error("operation cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn not_found(entity: &'static str, guid: Uuid) -> Self {
        Self::NotFound { entity, guid }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// 并发冲突可在重新加载后重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Concurrency { .. })
    }

    /// 是否为提交阶段（save_changes）产生的故障
    pub fn is_commit_fault(&self) -> bool {
        matches!(
            self,
            Self::Concurrency { .. } | Self::Constraint { .. } | Self::Commit { .. }
        )
    }

    /// 提交阶段的非冲突故障：约束与冲突原样保留，其余统一归为 `Commit`
    pub fn into_commit_fault(self) -> Self {
        match self {
            err @ (Self::Concurrency { .. } | Self::Constraint { .. } | Self::Commit { .. }) => err,
            Self::Cancelled => Self::Cancelled,
            other => Self::Commit {
                reason: other.to_string(),
            },
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Database {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_guid() {
        let guid = Uuid::new_v4();
        let err = DomainError::not_found("User", guid);
        assert_eq!(err.to_string(), format!("User with ID {guid} not found."));
        assert!(!err.is_retryable());
        assert!(!err.is_commit_fault());
    }

    #[test]
    fn concurrency_is_retryable_commit_fault() {
        let err = DomainError::Concurrency {
            entity: "Product".into(),
            guid: Uuid::nil(),
        };
        assert!(err.is_retryable());
        assert!(err.is_commit_fault());

        let constraint = DomainError::Constraint {
            reason: "duplicate".into(),
        };
        assert!(!constraint.is_retryable());
        assert!(constraint.is_commit_fault());
    }

    #[test]
    fn write_failure_during_commit_is_non_retryable_commit_fault() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "snapshot dir missing");
        let err = DomainError::from(io).into_commit_fault();

        assert!(matches!(err, DomainError::Commit { .. }));
        assert!(err.is_commit_fault());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("snapshot dir missing"));
    }

    #[test]
    fn commit_fault_mapping_keeps_conflicts_and_cancellation() {
        let stale = DomainError::Concurrency {
            entity: "User".into(),
            guid: Uuid::nil(),
        }
        .into_commit_fault();
        assert!(stale.is_retryable());

        let cancelled = DomainError::Cancelled.into_commit_fault();
        assert!(matches!(cancelled, DomainError::Cancelled));
        assert!(!cancelled.is_commit_fault());
    }

    #[test]
    fn uuid_parse_error_converts() {
        let err: DomainError = Uuid::parse_str("not-a-guid").unwrap_err().into();
        assert!(matches!(err, DomainError::Parse { .. }));
    }
}
