use std::sync::Arc;

use async_trait::async_trait;
use pixel_domain::entity::{Entity, Uuid};
use pixel_domain::model::{Email, FirstName, LastName, User};
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

/// 创建用户，成功时返回新用户的外部标识
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Request for CreateUser {
    const NAME: &'static str = "CreateUser";
    type Response = Uuid;
}

impl Command for CreateUser {}

pub struct CreateUserValidator;

impl Validator<CreateUser> for CreateUserValidator {
    fn validate(&self, command: &CreateUser) -> Vec<ValidationError> {
        [
            ValidationError::check("first_name", &FirstName::new(command.first_name.as_str())),
            ValidationError::check("last_name", &LastName::new(command.last_name.as_str())),
            ValidationError::check("email", &Email::new(command.email.as_str())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub struct CreateUserHandler {
    users: Arc<dyn Repository<User>>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateUserHandler {
    pub fn new(users: Arc<dyn Repository<User>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            users,
            unit_of_work,
        }
    }
}

#[async_trait]
impl Handler<CreateUser> for CreateUserHandler {
    async fn handle(&self, ctx: &AppContext, command: CreateUser) -> AppResult<Outcome<Uuid>> {
        let cancel = ctx.cancellation();

        let mut user = User::with_guid(Uuid::new_v4());
        user.first_name = FirstName::new(command.first_name);
        user.last_name = LastName::new(command.last_name);
        user.email = Email::new(command.email);
        let guid = user.guid();

        if let Err(err) = self.users.add(user, cancel).await {
            return Outcome::settle(err);
        }

        match self.unit_of_work.save_changes(cancel).await {
            Ok(_) => Ok(Outcome::success(guid)),
            Err(err) => Outcome::settle(err),
        }
    }
}
