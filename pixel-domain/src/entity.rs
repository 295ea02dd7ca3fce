//! 实体（Entity）基础抽象
//!
//! 每个实体同时具备：
//! - 内部自增标识 `id`（由存储在提交时分配，未持久化前为 0）
//! - 外部标识 `guid`（创建后不可变，同类实体内唯一）
//! - 行版本 `version`（乐观并发令牌）
//!
use crate::value_object::Version;

pub use uuid::Uuid;

/// 具备内部/外部标识与行版本的实体抽象
pub trait Entity: Clone + Send + Sync + 'static {
    /// 实体类型名（用于错误消息与存储表名）
    const TYPE: &'static str;

    /// 使用给定外部标识创建实体，其余字段取默认值
    fn with_guid(guid: Uuid) -> Self;

    /// 内部自增标识
    fn id(&self) -> u64;

    /// 外部标识
    fn guid(&self) -> Uuid;

    /// 当前行版本
    fn version(&self) -> Version;

    /// 由存储层回填内部标识与版本
    #[doc(hidden)]
    fn restore(&mut self, id: u64, version: Version);

    /// 是否尚未持久化
    fn is_transient(&self) -> bool {
        self.version().is_initial()
    }
}
