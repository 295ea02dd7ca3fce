use async_trait::async_trait;

use crate::{context::AppContext, error::AppResult, outcome::Outcome, request::Request};

/// 请求调度器（Dispatcher）
///
/// - 根据请求的具体类型路由到唯一的处理器，并依次经过已配置的行为；
/// - 自身不含业务逻辑；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// 发送请求
    ///
    /// - `Ok(Outcome)`：处理器（或短路的行为）给出的结果
    /// - `Err(AppError)`：未注册的请求类型，或处理过程中的故障
    async fn send<R>(&self, ctx: &AppContext, request: R) -> AppResult<Outcome<R::Response>>
    where
        R: Request;
}
