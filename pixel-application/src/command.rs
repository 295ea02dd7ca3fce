use crate::request::Request;

/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，通常会修改领域状态。
/// - 只有命令可以注册校验器（见 [`Validator`](crate::validation::Validator)）；
/// - 建议保持语义化的“动宾结构”命名，如 `CreateUser`、`DeleteUserById`。
pub trait Command: Request {}
