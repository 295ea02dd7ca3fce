use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::User;
use pixel_domain::repository::Repository;
use pixel_domain::unit_of_work::UnitOfWork;

use crate::{
    command::Command,
    context::AppContext,
    error::AppResult,
    handler::Handler,
    outcome::Outcome,
    request::Request,
    validation::{ValidationError, Validator},
};

#[derive(Debug, Clone)]
pub struct DeleteUserById {
    pub user_id: Uuid,
}

impl Request for DeleteUserById {
    const NAME: &'static str = "DeleteUserById";
    type Response = bool;
}

impl Command for DeleteUserById {}

pub struct DeleteUserByIdValidator;

impl Validator<DeleteUserById> for DeleteUserByIdValidator {
    fn validate(&self, command: &DeleteUserById) -> Vec<ValidationError> {
        if command.user_id.is_nil() {
            return vec![ValidationError::new("user_id", "must not be empty")];
        }
        Vec::new()
    }
}

pub struct DeleteUserByIdHandler {
    users: Arc<dyn Repository<User>>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteUserByIdHandler {
    pub fn new(users: Arc<dyn Repository<User>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            users,
            unit_of_work,
        }
    }
}

#[async_trait]
impl Handler<DeleteUserById> for DeleteUserByIdHandler {
    async fn handle(&self, ctx: &AppContext, command: DeleteUserById) -> AppResult<Outcome<bool>> {
        let cancel = ctx.cancellation();

        match self.users.get_by_id(command.user_id, cancel).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(Outcome::entity_not_found(User::TYPE, command.user_id)),
            Err(err) => return Outcome::settle(err),
        }

        if let Err(err) = self.users.delete_by_id(command.user_id, cancel).await {
            return Outcome::settle(err);
        }

        match self.unit_of_work.save_changes(cancel).await {
            Ok(_) => Ok(Outcome::success(true)),
            Err(err) => Outcome::settle(err),
        }
    }
}
