//! 管道行为（Pipeline Behavior）
//!
//! 行为包裹处理器调用，按配置顺序由外到内执行；
//! 每个行为可以直接返回结果（短路），或调用 `next` 交给内层。
//!
use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::{context::AppContext, error::AppResult, outcome::Outcome, request::Request};

/// 内层调用返回的 future
pub type HandlerFuture<'a, R> = BoxFuture<'a, AppResult<Outcome<<R as Request>::Response>>>;

/// 行为链中的“下一步”，只能调用一次
pub struct Next<'a, R>
where
    R: Request,
{
    inner: Box<dyn FnOnce(R) -> HandlerFuture<'a, R> + Send + 'a>,
}

impl<'a, R> Next<'a, R>
where
    R: Request,
{
    pub fn new(f: impl FnOnce(R) -> HandlerFuture<'a, R> + Send + 'a) -> Self {
        Self { inner: Box::new(f) }
    }

    pub fn run(self, request: R) -> HandlerFuture<'a, R> {
        (self.inner)(request)
    }
}

#[async_trait]
pub trait PipelineBehavior<R>: Send + Sync
where
    R: Request,
{
    async fn handle<'a>(
        &'a self,
        ctx: &'a AppContext,
        request: R,
        next: Next<'a, R>,
    ) -> AppResult<Outcome<R::Response>>;
}

/// 管道阶段，用于配置行为顺序（外层在前）
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// 命令校验；查询管道会跳过该阶段
    Validation,
    /// 请求日志
    Logging,
}

impl PipelineStage {
    pub const DEFAULT_ORDER: [PipelineStage; 2] = [PipelineStage::Validation, PipelineStage::Logging];
}
