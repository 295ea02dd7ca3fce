use pixel_domain::error::DomainError;

/// 应用层故障
///
/// 与 `Outcome` 的失败分支不同，这里只承载“预期之外”的情况：
/// 启动期注册错误、调度期找不到处理器，以及提交阶段（并发/约束）故障。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: request={request}")]
    AlreadyRegistered { request: &'static str },

    #[error("validator registered without handler: request={request}")]
    ValidatorWithoutHandler { request: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("configuration: {0}")]
    Configuration(String),
}

impl AppError {
    /// 仅并发冲突可重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Domain(err) if err.is_retryable())
    }
}

pub type AppResult<T> = Result<T, AppError>;
