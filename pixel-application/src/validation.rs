//! 命令校验
//!
//! 校验器以代码形式提供，只负责产出错误列表；
//! 聚合与短路由 [`ValidationBehavior`](crate::behaviors::ValidationBehavior) 完成。
//!
use std::fmt;

use pixel_domain::value_object::ValueObject;

use crate::command::Command;

/// 单条校验错误（字段名 + 描述）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 将值对象自身的校验结果转换为字段错误
    pub fn check<V>(field: &str, value: &V) -> Option<Self>
    where
        V: ValueObject,
        V::Error: fmt::Display,
    {
        value
            .validate()
            .err()
            .map(|err| Self::new(field, err.to_string()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 命令校验器；同一命令可注册多个，按注册顺序执行
pub trait Validator<C>: Send + Sync
where
    C: Command,
{
    fn validate(&self, command: &C) -> Vec<ValidationError>;
}
