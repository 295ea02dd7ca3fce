use bon::Builder;
use tokio_util::sync::CancellationToken;

/// 应用层上下文（Application Context）
///
/// 承载一次请求所需的横切信息：
/// - 关联标识（`correlation_id`）：写入日志，便于串联一次调用链；
/// - 取消令牌（`cancellation`）：由调用方持有，传递到行为链、处理器与仓储。
///
/// ```rust
/// use pixel_application::context::AppContext;
///
/// let ctx = AppContext::builder().correlation_id("cor-123".into()).build();
/// assert_eq!(ctx.correlation_id(), Some("cor-123"));
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    correlation_id: Option<String>,
    #[builder(default)]
    cancellation: CancellationToken,
}

impl AppContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
