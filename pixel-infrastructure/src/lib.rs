//! PixelStore 基础设施层（pixel-infrastructure）
//!
//! 领域/应用端口的进程内实现：
//! - 存储（`store`）：按表保存实体，原子提交，可选 JSON 快照文件
//! - 工作单元（`unit_of_work`）与通用仓储（`repository`）
//! - 请求作用域工厂（`scope`）
//! - 带过期时间的缓存（`cache`）
//! - 提供方配置（`settings`）与种子数据（`seed`）
//!
pub mod cache;
pub mod repository;
pub mod scope;
pub mod seed;
pub mod settings;
pub mod store;
pub mod unit_of_work;

pub use cache::InMemoryCache;
pub use scope::{InMemoryScope, InMemoryScopeFactory};
pub use seed::{SeedOptions, SeedReport, seed_catalog};
pub use settings::{DatabaseProvider, DatabaseSettings, SettingsError};
pub use store::InMemoryStore;
