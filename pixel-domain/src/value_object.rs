//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use std::fmt;

use serde::{Deserialize, Serialize};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 行版本（乐观并发令牌）
///
/// 初始为 0 表示尚未持久化；每次成功提交插入或更新后递增。
///
/// ```
/// use pixel_domain::value_object::Version;
///
/// let v0 = Version::initial();
/// assert!(v0.is_initial());
///
/// let v1 = v0.next();
/// assert_eq!(v1.value(), 1);
/// assert!(v1 > v0);
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub const fn initial() -> Self {
        Self(0)
    }

    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_initial(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_starts_initial_and_increments() {
        let v = Version::default();
        assert_eq!(v, Version::initial());
        assert!(v.is_initial());

        let v3 = v.next().next().next();
        assert_eq!(v3.value(), 3);
        assert!(!v3.is_initial());
        assert_eq!(v3.to_string(), "v3");
    }

    #[test]
    fn version_serializes_as_number() {
        let v = Version::from_value(42);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "42");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
