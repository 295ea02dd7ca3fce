use std::sync::Arc;

use async_trait::async_trait;

use crate::{context::AppContext, error::AppResult, outcome::Outcome, request::Request};

/// 请求处理器；每种请求类型有且只有一个
///
/// 预期内的失败以 `Outcome::Failure` 返回；`Err` 仅用于提交阶段等故障。
#[async_trait]
pub trait Handler<R>: Send + Sync
where
    R: Request,
{
    async fn handle(&self, ctx: &AppContext, request: R) -> AppResult<Outcome<R::Response>>;
}

#[async_trait]
impl<R, T> Handler<R> for Arc<T>
where
    R: Request,
    T: Handler<R> + ?Sized,
{
    async fn handle(&self, ctx: &AppContext, request: R) -> AppResult<Outcome<R::Response>> {
        (**self).handle(ctx, request).await
    }
}
