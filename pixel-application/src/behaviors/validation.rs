use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::behavior::{Next, PipelineBehavior};
use crate::command::Command;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::outcome::Outcome;
use crate::validation::{ValidationError, Validator};

/// 校验行为
/// - 未注册校验器：直接交给内层
/// - 运行全部校验器并按注册顺序汇总错误；存在错误时短路返回 `Outcome::invalid`
pub struct ValidationBehavior<C>
where
    C: Command,
{
    validators: Vec<Arc<dyn Validator<C>>>,
}

impl<C> ValidationBehavior<C>
where
    C: Command,
{
    pub fn new(validators: Vec<Arc<dyn Validator<C>>>) -> Self {
        Self { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

#[async_trait]
impl<C> PipelineBehavior<C> for ValidationBehavior<C>
where
    C: Command,
{
    async fn handle<'a>(
        &'a self,
        _ctx: &'a AppContext,
        request: C,
        next: Next<'a, C>,
    ) -> AppResult<Outcome<C::Response>> {
        if self.validators.is_empty() {
            return next.run(request).await;
        }

        let errors: Vec<ValidationError> = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(&request))
            .collect();

        if !errors.is_empty() {
            debug!(request = C::NAME, errors = errors.len(), "validation failed");
            return Ok(Outcome::invalid(errors));
        }

        next.run(request).await
    }
}
