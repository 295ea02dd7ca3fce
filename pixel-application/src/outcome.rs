//! 请求结果（Outcome）
//!
//! 所有处理器返回 `Outcome<T>` 表达预期内的成功或失败，而不是抛出错误：
//! - `Success(T)`：携带结果值；
//! - `Failure(Failure)`：携带失败类别、非空消息与（校验失败时的）全部校验错误。
//!
//! 成功与否只由分支决定，与消息内容无关。
//!
use std::fmt;

use pixel_domain::error::DomainError;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::validation::ValidationError;

/// 失败类别
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 输入未通过校验
    Validation,
    /// 目标实体不存在
    NotFound,
    /// 业务拒绝
    Rejected,
    /// 调用方已取消
    Cancelled,
    /// 协作方出现的非预期错误（已转为失败结果）
    Unexpected,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::NotFound => "not_found",
            FailureKind::Rejected => "rejected",
            FailureKind::Cancelled => "cancelled",
            FailureKind::Unexpected => "unexpected",
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            FailureKind::Validation => "One or more validation failures have occurred.",
            FailureKind::NotFound => "The requested resource was not found.",
            FailureKind::Rejected => "The request was rejected.",
            FailureKind::Cancelled => "The request was cancelled.",
            FailureKind::Unexpected => "An unexpected error occurred.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 失败详情
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    errors: Vec<ValidationError>,
}

impl Failure {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.default_message().to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// 请求结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// 业务拒绝；空消息会被替换为默认消息
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(FailureKind::Rejected, message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(FailureKind::NotFound, message))
    }

    /// 以 `<Entity> with ID <guid> not found.` 形式描述的不存在
    pub fn entity_not_found(entity: &str, guid: Uuid) -> Self {
        Self::not_found(format!("{entity} with ID {guid} not found."))
    }

    /// 汇总全部校验错误；消息中包含每一条错误
    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        let detail = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let message = if detail.is_empty() {
            String::new()
        } else {
            format!("One or more validation failures have occurred: {detail}")
        };
        let mut failure = Failure::new(FailureKind::Validation, message);
        failure.errors = errors;
        Outcome::Failure(failure)
    }

    pub fn cancelled() -> Self {
        Outcome::Failure(Failure::new(FailureKind::Cancelled, ""))
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(FailureKind::Unexpected, message))
    }

    /// 将协作方错误就地归类：
    /// - `NotFound` → 不存在失败；`Cancelled` → 取消失败；
    /// - 提交阶段故障（并发/约束）→ `Err`，交由行为链记录并上抛；
    /// - 其余 → 非预期失败，消息为错误原文。
    pub fn settle(err: DomainError) -> AppResult<Self> {
        match err {
            DomainError::NotFound { .. } => Ok(Self::not_found(err.to_string())),
            DomainError::Cancelled => Ok(Self::cancelled()),
            err if err.is_commit_fault() => Err(AppError::Domain(err)),
            err => Ok(Self::unexpected(err.to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(f),
        }
    }

    /// 失败消息；成功时为 `None`
    pub fn error_message(&self) -> Option<&str> {
        self.failure_ref().map(Failure::message)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(f) => Err(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_value() {
        let outcome = Outcome::success(7);
        assert!(outcome.is_success());
        assert_eq!(outcome.value(), Some(&7));
        assert_eq!(outcome.error_message(), None);
        assert_eq!(outcome.map(|v| v * 2).into_value(), Some(14));
    }

    #[test]
    fn blank_failure_message_is_replaced() {
        let outcome: Outcome<()> = Outcome::failure("  ");
        assert!(outcome.is_failure());
        assert_eq!(outcome.error_message(), Some("The request was rejected."));

        let cancelled: Outcome<()> = Outcome::cancelled();
        assert_eq!(
            cancelled.failure_ref().map(Failure::kind),
            Some(FailureKind::Cancelled)
        );
    }

    #[test]
    fn success_is_independent_of_message_content() {
        // 成功值是字符串也不会影响判定
        let outcome = Outcome::success(String::new());
        assert!(outcome.is_success());
    }

    #[test]
    fn invalid_lists_every_error() {
        let outcome: Outcome<()> = Outcome::invalid(vec![
            ValidationError::new("email", "must not be empty"),
            ValidationError::new("first_name", "too long"),
        ]);

        let failure = outcome.into_result().unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(failure.errors().len(), 2);
        assert_eq!(
            failure.message(),
            "One or more validation failures have occurred: email: must not be empty; first_name: too long"
        );
    }

    #[test]
    fn settle_classifies_domain_errors() {
        let guid = Uuid::new_v4();

        let nf: Outcome<()> = Outcome::settle(DomainError::not_found("User", guid)).unwrap();
        assert_eq!(nf.failure_ref().unwrap().kind(), FailureKind::NotFound);
        assert!(nf.error_message().unwrap().contains(&guid.to_string()));

        let other: Outcome<()> =
            Outcome::settle(DomainError::Database { reason: "disk".into() }).unwrap();
        assert_eq!(other.failure_ref().unwrap().kind(), FailureKind::Unexpected);
        assert_eq!(other.error_message(), Some("database error: disk"));

        let fault = Outcome::<()>::settle(DomainError::Concurrency {
            entity: "User".into(),
            guid,
        })
        .unwrap_err();
        assert!(fault.is_retryable());
    }
}
