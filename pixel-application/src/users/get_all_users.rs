use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::model::User;
use pixel_domain::repository::Repository;

use super::UserResponse;
use crate::{
    context::AppContext, error::AppResult, handler::Handler, outcome::Outcome, query::Query,
    request::Request,
};

#[derive(Debug, Clone, Default)]
pub struct GetAllUsers;

impl Request for GetAllUsers {
    const NAME: &'static str = "GetAllUsers";
    type Response = Vec<UserResponse>;
}

impl Query for GetAllUsers {}

pub struct GetAllUsersHandler {
    users: Arc<dyn Repository<User>>,
}

impl GetAllUsersHandler {
    pub fn new(users: Arc<dyn Repository<User>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler<GetAllUsers> for GetAllUsersHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        _query: GetAllUsers,
    ) -> AppResult<Outcome<Vec<UserResponse>>> {
        match self.users.get_all(ctx.cancellation()).await {
            Ok(users) => Ok(Outcome::success(
                users.iter().map(UserResponse::from).collect(),
            )),
            Err(err) => Outcome::settle(err),
        }
    }
}
