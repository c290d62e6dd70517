//! Password login and public registration.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, Role, User},
    service::user::UserService,
    util::password::PasswordEncoder,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    password_encoder: &'a PasswordEncoder,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, password_encoder: &'a PasswordEncoder) -> Self {
        Self {
            db,
            password_encoder,
        }
    }

    /// Registers a new account. Self-registered accounts are always clients.
    pub async fn register(&self, mut param: CreateUserParam) -> Result<User, AppError> {
        param.role = Role::Client;

        UserService::new(self.db, self.password_encoder)
            .create(param)
            .await
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.password_encoder.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}
