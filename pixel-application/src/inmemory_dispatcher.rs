use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::debug;

use crate::behavior::{HandlerFuture, Next, PipelineBehavior, PipelineStage};
use crate::behaviors::{LoggingBehavior, ValidationBehavior};
use crate::command::Command;
use crate::context::AppContext;
use crate::dispatcher::Dispatcher;
use crate::error::{AppError, AppResult};
use crate::handler::Handler;
use crate::outcome::Outcome;
use crate::query::Query;
use crate::request::Request;
use crate::scope::{RequestScope, ScopeFactory};
use crate::validation::Validator;

type HandlerFactory<R> = Arc<dyn Fn(&dyn RequestScope) -> Box<dyn Handler<R>> + Send + Sync>;

type ErasedPipeline = Arc<dyn Any + Send + Sync>;
type ErasedValidators = Box<dyn Any + Send + Sync>;
type Assemble =
    Box<dyn FnOnce(&[PipelineStage], Option<ErasedValidators>) -> AppResult<ErasedPipeline> + Send>;

// 单个请求类型的完整管道：行为（外层在前）+ 处理器工厂
struct Pipeline<R>
where
    R: Request,
{
    behaviors: Vec<Arc<dyn PipelineBehavior<R>>>,
    factory: HandlerFactory<R>,
}

struct Registration {
    request: &'static str,
    assemble: Assemble,
}

struct ValidatorSlot {
    request: &'static str,
    validators: ErasedValidators,
}

/// 基于内存的 Dispatcher 实现
/// - 启动期通过 [`DispatcherBuilder`] 显式注册，构建后只读
/// - 以 TypeId 索引类型擦除的管道，调度时按请求类型还原
/// - 每次调度创建新的请求作用域，并由工厂构造处理器
pub struct InMemoryDispatcher {
    pipelines: HashMap<TypeId, ErasedPipeline>,
    names: Vec<&'static str>,
    scopes: Arc<dyn ScopeFactory>,
}

impl InMemoryDispatcher {
    pub fn builder(scopes: Arc<dyn ScopeFactory>) -> DispatcherBuilder {
        DispatcherBuilder::new(scopes)
    }

    /// 已注册的请求名称（注册顺序）
    pub fn registered_requests(&self) -> &[&'static str] {
        &self.names
    }

    fn pipeline<R>(&self) -> AppResult<Arc<Pipeline<R>>>
    where
        R: Request,
    {
        let Some(erased) = self.pipelines.get(&TypeId::of::<R>()).cloned() else {
            return Err(AppError::HandlerNotFound(R::NAME));
        };

        // 键与管道同一泛型 R，正常情况下不会失败
        erased
            .downcast::<Pipeline<R>>()
            .map_err(|_| AppError::TypeMismatch {
                expected: R::NAME,
                found: "unknown",
            })
    }
}

// 从外到内依次执行行为，最内层调用处理器；已取消时不进入处理器
fn invoke<'a, R>(
    behaviors: &'a [Arc<dyn PipelineBehavior<R>>],
    ctx: &'a AppContext,
    request: R,
    handler: &'a dyn Handler<R>,
) -> HandlerFuture<'a, R>
where
    R: Request,
{
    match behaviors.split_first() {
        Some((outer, rest)) => {
            let next = Next::new(move |request| invoke(rest, ctx, request, handler));
            outer.handle(ctx, request, next)
        }
        None if ctx.is_cancelled() => {
            debug!(request = R::NAME, "request cancelled before handler");
            async { Ok(Outcome::cancelled()) }.boxed()
        }
        None => handler.handle(ctx, request),
    }
}

#[async_trait]
impl Dispatcher for InMemoryDispatcher {
    async fn send<R>(&self, ctx: &AppContext, request: R) -> AppResult<Outcome<R::Response>>
    where
        R: Request,
    {
        let pipeline = self.pipeline::<R>()?;
        let scope = self.scopes.create_scope();
        let handler = (pipeline.factory)(scope.as_ref());

        invoke(&pipeline.behaviors, ctx, request, handler.as_ref()).await
    }
}

/// 调度器构建器
///
/// ```text
/// InMemoryDispatcher::builder(scopes)
///     .command::<DeleteUserById, _, _>(|s| DeleteUserByIdHandler::new(s.users(), s.unit_of_work()))
///     .validator::<DeleteUserById, _>(DeleteUserByIdValidator)
///     .query::<GetAllUsers, _, _>(|s| GetAllUsersHandler::new(s.users()))
///     .build()?;
/// ```
///
/// `build` 在以下情况失败：
/// - 同一请求类型重复注册处理器
/// - 为未注册处理器的命令注册了校验器
/// - `require` 声明的请求没有处理器
/// - 行为阶段重复
pub struct DispatcherBuilder {
    scopes: Arc<dyn ScopeFactory>,
    stages: Vec<PipelineStage>,
    registrations: HashMap<TypeId, Registration>,
    order: Vec<TypeId>,
    validators: HashMap<TypeId, ValidatorSlot>,
    required: Vec<(TypeId, &'static str)>,
    errors: Vec<AppError>,
}

impl DispatcherBuilder {
    pub fn new(scopes: Arc<dyn ScopeFactory>) -> Self {
        Self {
            scopes,
            stages: PipelineStage::DEFAULT_ORDER.to_vec(),
            registrations: HashMap::new(),
            order: Vec::new(),
            validators: HashMap::new(),
            required: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// 行为顺序（外层在前），默认 `[Validation, Logging]`
    pub fn stages(mut self, stages: impl IntoIterator<Item = PipelineStage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    /// 注册命令处理器；工厂在每次调度时以请求作用域构造处理器
    pub fn command<C, H, F>(self, factory: F) -> Self
    where
        C: Command,
        H: Handler<C> + 'static,
        F: Fn(&dyn RequestScope) -> H + Send + Sync + 'static,
    {
        let factory: HandlerFactory<C> = Arc::new(move |scope: &dyn RequestScope| {
            Box::new(factory(scope)) as Box<dyn Handler<C>>
        });

        let assemble: Assemble = Box::new(
            move |stages: &[PipelineStage], validators: Option<ErasedValidators>| {
                let validators: Vec<Arc<dyn Validator<C>>> = match validators {
                    Some(erased) => *erased
                        .downcast::<Vec<Arc<dyn Validator<C>>>>()
                        .map_err(|_| AppError::TypeMismatch {
                            expected: C::NAME,
                            found: "validator set",
                        })?,
                    None => Vec::new(),
                };

                let behaviors = stages
                    .iter()
                    .map(|stage| match stage {
                        PipelineStage::Validation => {
                            Arc::new(ValidationBehavior::new(validators.clone()))
                                as Arc<dyn PipelineBehavior<C>>
                        }
                        PipelineStage::Logging => {
                            Arc::new(LoggingBehavior) as Arc<dyn PipelineBehavior<C>>
                        }
                    })
                    .collect();

                Ok(Arc::new(Pipeline { behaviors, factory }) as ErasedPipeline)
            },
        );

        self.register::<C>(assemble)
    }

    /// 注册查询处理器；查询管道不包含校验阶段
    pub fn query<Q, H, F>(self, factory: F) -> Self
    where
        Q: Query,
        H: Handler<Q> + 'static,
        F: Fn(&dyn RequestScope) -> H + Send + Sync + 'static,
    {
        let factory: HandlerFactory<Q> = Arc::new(move |scope: &dyn RequestScope| {
            Box::new(factory(scope)) as Box<dyn Handler<Q>>
        });

        let assemble: Assemble = Box::new(
            move |stages: &[PipelineStage], validators: Option<ErasedValidators>| {
                if validators.is_some() {
                    return Err(AppError::Configuration(format!(
                        "{} is registered as a query and does not accept validators",
                        Q::NAME
                    )));
                }

                let behaviors = stages
                    .iter()
                    .filter_map(|stage| match stage {
                        PipelineStage::Validation => None,
                        PipelineStage::Logging => {
                            Some(Arc::new(LoggingBehavior) as Arc<dyn PipelineBehavior<Q>>)
                        }
                    })
                    .collect();

                Ok(Arc::new(Pipeline { behaviors, factory }) as ErasedPipeline)
            },
        );

        self.register::<Q>(assemble)
    }

    /// 为命令追加校验器（按注册顺序执行）
    pub fn validator<C, V>(mut self, validator: V) -> Self
    where
        C: Command,
        V: Validator<C> + 'static,
    {
        let slot = self
            .validators
            .entry(TypeId::of::<C>())
            .or_insert_with(|| ValidatorSlot {
                request: C::NAME,
                validators: Box::new(Vec::<Arc<dyn Validator<C>>>::new()),
            });

        match slot.validators.downcast_mut::<Vec<Arc<dyn Validator<C>>>>() {
            Some(list) => list.push(Arc::new(validator)),
            None => self.errors.push(AppError::TypeMismatch {
                expected: C::NAME,
                found: "validator set",
            }),
        }
        self
    }

    /// 声明必须存在处理器的请求类型
    pub fn require<R>(mut self) -> Self
    where
        R: Request,
    {
        self.required.push((TypeId::of::<R>(), R::NAME));
        self
    }

    fn register<R>(mut self, assemble: Assemble) -> Self
    where
        R: Request,
    {
        let key = TypeId::of::<R>();
        if self.registrations.contains_key(&key) {
            self.errors
                .push(AppError::AlreadyRegistered { request: R::NAME });
            return self;
        }

        self.registrations.insert(
            key,
            Registration {
                request: R::NAME,
                assemble,
            },
        );
        self.order.push(key);
        self
    }

    pub fn build(self) -> AppResult<InMemoryDispatcher> {
        let Self {
            scopes,
            stages,
            mut registrations,
            order,
            mut validators,
            required,
            errors,
        } = self;

        if let Some(err) = errors.into_iter().next() {
            return Err(err);
        }

        for (i, stage) in stages.iter().enumerate() {
            if stages[..i].contains(stage) {
                return Err(AppError::Configuration(format!(
                    "pipeline stage {stage:?} configured more than once"
                )));
            }
        }

        if let Some((_, name)) = required
            .iter()
            .find(|(key, _)| !registrations.contains_key(key))
        {
            return Err(AppError::HandlerNotFound(name));
        }

        let mut pipelines = HashMap::with_capacity(order.len());
        let mut names = Vec::with_capacity(order.len());
        for key in order {
            let Some(registration) = registrations.remove(&key) else {
                continue;
            };
            let slot = validators.remove(&key).map(|slot| slot.validators);
            pipelines.insert(key, (registration.assemble)(&stages, slot)?);
            names.push(registration.request);
        }

        if let Some(slot) = validators.into_values().next() {
            return Err(AppError::ValidatorWithoutHandler {
                request: slot.request,
            });
        }

        debug!(requests = names.len(), stages = ?stages, "dispatcher built");

        Ok(InMemoryDispatcher {
            pipelines,
            names,
            scopes,
        })
    }
}
