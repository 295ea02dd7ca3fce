//! PixelStore 领域层（pixel-domain）
//!
//! 定义目录实体与值对象，以及与存储实现解耦的持久化接口：
//! - 实体（`entity`）与值对象（`value_object`）建模
//! - 目录模型（`model`）：用户、商品、订单、订单行、地址、客户
//! - 通用仓储（`repository`）与工作单元（`unit_of_work`）
//! - 统一错误（`error`）
//!
pub mod entity;
pub mod error;
pub mod model;
pub mod repository;
pub mod unit_of_work;
pub mod value_object;

// 允许在本 crate 内部通过 ::pixel_domain 进行自引用，
// 以便过程宏展开出的路径在本 crate 中也能解析。
extern crate self as pixel_domain;
