//! 用户用例
//!
mod create_user;
mod delete_user_by_id;
mod dto;
mod get_all_users;
mod get_user_by_id;

pub use create_user::{CreateUser, CreateUserHandler, CreateUserValidator};
pub use delete_user_by_id::{DeleteUserById, DeleteUserByIdHandler, DeleteUserByIdValidator};
pub use dto::UserResponse;
pub use get_all_users::{GetAllUsers, GetAllUsersHandler};
pub use get_user_by_id::{GetUserById, GetUserByIdHandler};
