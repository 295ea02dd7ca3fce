/// 请求消息（命令与查询的共同基础）
///
/// - `NAME`：稳定名称，用于日志与路由错误信息，避免依赖 `type_name::<T>()`；
/// - `Response`：成功时 `Outcome` 携带的值类型。
pub trait Request: Send + Sync + 'static {
    const NAME: &'static str;

    type Response: Send + 'static;
}
