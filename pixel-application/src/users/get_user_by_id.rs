use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::User;
use pixel_domain::repository::Repository;

use super::UserResponse;
use crate::{
    context::AppContext, error::AppResult, handler::Handler, outcome::Outcome, query::Query,
    request::Request,
};

#[derive(Debug, Clone)]
pub struct GetUserById {
    pub user_id: Uuid,
}

impl Request for GetUserById {
    const NAME: &'static str = "GetUserById";
    type Response = UserResponse;
}

impl Query for GetUserById {}

pub struct GetUserByIdHandler {
    users: Arc<dyn Repository<User>>,
}

impl GetUserByIdHandler {
    pub fn new(users: Arc<dyn Repository<User>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler<GetUserById> for GetUserByIdHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        query: GetUserById,
    ) -> AppResult<Outcome<UserResponse>> {
        match self.users.get_by_id(query.user_id, ctx.cancellation()).await {
            Ok(Some(user)) => Ok(Outcome::success(UserResponse::from(&user))),
            Ok(None) => Ok(Outcome::entity_not_found(User::TYPE, query.user_id)),
            Err(err) => Outcome::settle(err),
        }
    }
}
