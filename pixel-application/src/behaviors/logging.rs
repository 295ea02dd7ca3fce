use async_trait::async_trait;
use tracing::{error, info};

use crate::behavior::{Next, PipelineBehavior};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::outcome::Outcome;
use crate::request::Request;

/// 日志行为
/// - 进入：info 记录开始处理
/// - 成功：info 记录处理完成
/// - 失败结果：error 记录失败消息原文
/// - 故障（`Err`）：error 记录后原样返回
///
/// 每个请求恰好产生一条完成记录。
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingBehavior;

#[async_trait]
impl<R> PipelineBehavior<R> for LoggingBehavior
where
    R: Request,
{
    async fn handle<'a>(
        &'a self,
        ctx: &'a AppContext,
        request: R,
        next: Next<'a, R>,
    ) -> AppResult<Outcome<R::Response>> {
        // 未设置时不写该字段
        let correlation_id = ctx.correlation_id();
        info!(
            request = R::NAME,
            correlation_id, "Starting request processing for {}", R::NAME
        );

        let result = next.run(request).await;

        match &result {
            Ok(Outcome::Success(_)) => {
                info!(
                    request = R::NAME,
                    correlation_id, "Request {} processed successfully.", R::NAME
                );
            }
            Ok(Outcome::Failure(failure)) => {
                error!(
                    request = R::NAME,
                    correlation_id,
                    kind = %failure.kind(),
                    error = failure.message(),
                    "Request {} processed with error: {}",
                    R::NAME,
                    failure.message()
                );
            }
            Err(err) => {
                error!(
                    request = R::NAME,
                    correlation_id,
                    retryable = err.is_retryable(),
                    error = %err,
                    "Request {} processing failed due to a fault.",
                    R::NAME
                );
            }
        }

        result
    }
}
