use crate::{dto::Dto, request::Request};

/// 应用层查询（Query）
///
/// 表达只读意图，不改变领域状态，结果为 [`Dto`](crate::dto::Dto)。
/// 查询不参与校验阶段。
pub trait Query: Request<Response: Dto> {}
