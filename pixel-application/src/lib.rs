//! PixelStore 应用层（pixel-application）
//!
//! 请求管道：
//! - 消息契约：`Request` / `Command` / `Query`
//! - 结果：`Outcome<T>`（预期内失败）与 `AppError`（故障）
//! - 行为：校验（`ValidationBehavior`）与日志（`LoggingBehavior`）
//! - 调度：`Dispatcher` 与进程内实现 `InMemoryDispatcher`
//! - 用例：`users`、`products`，由 `catalog::register` 统一注册
//!
pub mod behavior;
pub mod behaviors;
pub mod caching;
pub mod catalog;
pub mod command;
pub mod context;
pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod handler;
pub mod inmemory_dispatcher;
pub mod outcome;
pub mod products;
pub mod query;
pub mod request;
pub mod scope;
pub mod users;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use inmemory_dispatcher::{DispatcherBuilder, InMemoryDispatcher};
pub use outcome::{Failure, FailureKind, Outcome};
