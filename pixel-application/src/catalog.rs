//! 目录用例注册
//!
//! 在启动期显式注册全部处理器与校验器，并将每个请求声明为必需。
//!
use std::sync::Arc;

use crate::caching::Cache;
use crate::inmemory_dispatcher::DispatcherBuilder;
use crate::products::{
    CreateProduct, CreateProductHandler, CreateProductValidator, DeleteProductById,
    DeleteProductByIdHandler, DeleteProductByIdValidator, GetAllProducts, GetAllProductsHandler,
    GetProductById, GetProductByIdHandler,
};
use crate::scope::RequestScope;
use crate::users::{
    CreateUser, CreateUserHandler, CreateUserValidator, DeleteUserById, DeleteUserByIdHandler,
    DeleteUserByIdValidator, GetAllUsers, GetAllUsersHandler, GetUserById, GetUserByIdHandler,
};

pub fn register(builder: DispatcherBuilder, cache: Arc<dyn Cache>) -> DispatcherBuilder {
    let read_cache = cache.clone();
    let evict_cache = cache;

    builder
        // users
        .query::<GetAllUsers, _, _>(|scope: &dyn RequestScope| {
            GetAllUsersHandler::new(scope.users())
        })
        .query::<GetUserById, _, _>(|scope: &dyn RequestScope| {
            GetUserByIdHandler::new(scope.users())
        })
        .command::<CreateUser, _, _>(|scope: &dyn RequestScope| {
            CreateUserHandler::new(scope.users(), scope.unit_of_work())
        })
        .validator::<CreateUser, _>(CreateUserValidator)
        .command::<DeleteUserById, _, _>(|scope: &dyn RequestScope| {
            DeleteUserByIdHandler::new(scope.users(), scope.unit_of_work())
        })
        .validator::<DeleteUserById, _>(DeleteUserByIdValidator)
        // products
        .query::<GetAllProducts, _, _>(|scope: &dyn RequestScope| {
            GetAllProductsHandler::new(scope.products())
        })
        .query::<GetProductById, _, _>(move |scope: &dyn RequestScope| {
            GetProductByIdHandler::new(scope.products(), read_cache.clone())
        })
        .command::<CreateProduct, _, _>(|scope: &dyn RequestScope| {
            CreateProductHandler::new(scope.products(), scope.unit_of_work())
        })
        .validator::<CreateProduct, _>(CreateProductValidator)
        .command::<DeleteProductById, _, _>(move |scope: &dyn RequestScope| {
            DeleteProductByIdHandler::new(scope.products(), scope.unit_of_work(), evict_cache.clone())
        })
        .validator::<DeleteProductById, _>(DeleteProductByIdValidator)
        .require::<GetAllUsers>()
        .require::<GetUserById>()
        .require::<CreateUser>()
        .require::<DeleteUserById>()
        .require::<GetAllProducts>()
        .require::<GetProductById>()
        .require::<CreateProduct>()
        .require::<DeleteProductById>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AppContext;
    use crate::dispatcher::Dispatcher;
    use crate::inmemory_dispatcher::InMemoryDispatcher;
    use crate::outcome::FailureKind;
    use crate::testing::{FakeCache, FakeScopes};
    use pixel_domain::entity::Uuid;

    fn dispatcher() -> InMemoryDispatcher {
        register(
            InMemoryDispatcher::builder(Arc::new(FakeScopes::default())),
            Arc::new(FakeCache::default()),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn every_catalog_request_is_registered() {
        assert_eq!(dispatcher().registered_requests().len(), 8);
    }

    #[tokio::test]
    async fn invalid_create_user_never_reaches_store() {
        let scopes = Arc::new(FakeScopes::default());
        let dispatcher = register(
            InMemoryDispatcher::builder(scopes.clone()),
            Arc::new(FakeCache::default()),
        )
        .build()
        .unwrap();

        let outcome = dispatcher
            .send(
                &AppContext::default(),
                CreateUser {
                    first_name: String::new(),
                    last_name: String::new(),
                    email: "broken".into(),
                },
            )
            .await
            .unwrap();

        let failure = outcome.failure_ref().unwrap();
        assert_eq!(failure.kind(), FailureKind::Validation);
        assert_eq!(failure.errors().len(), 3);
        assert_eq!(scopes.scope.users.len(), 0);
    }

    #[tokio::test]
    async fn nil_user_id_is_a_validation_failure() {
        let outcome = dispatcher()
            .send(
                &AppContext::default(),
                DeleteUserById {
                    user_id: Uuid::nil(),
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.failure_ref().unwrap().kind(), FailureKind::Validation);
    }
}
