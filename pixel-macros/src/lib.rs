//! PixelStore 领域建模过程宏（pixel-macros）
//!
//! - `#[entity]`：为具名字段结构体注入 `id / guid / version` 并实现 `Entity`
//! - `#[value_object]`：合并值对象所需派生，并为单字段 newtype 生成常用访问器
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity;
mod field_utils;
mod value_object;

/// 实体宏
/// - 注入字段：`id: u64`（内部自增标识）、`guid: Uuid`（外部标识）、`version: Version`
/// - 实现 `::pixel_domain::entity::Entity`
/// - 参数：`#[entity(name = "User", debug = true|false)]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 值对象宏
/// - 追加派生：Debug(可关闭), Default, Clone, Serialize, Deserialize, PartialEq, Eq
/// - 单字段 tuple struct 额外生成 `new / value / into_inner / AsRef / From / Display`
/// - 参数：`#[value_object(debug = true|false)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
