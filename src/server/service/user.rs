//! User account management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParam, Role, UpdateUserParam, User, UserChanges},
    util::password::PasswordEncoder,
};

const HAS_APPOINTMENTS: &str = "User has appointments and cannot be deleted";
const USERNAME_TAKEN: &str = "Username already exists";
const EMAIL_TAKEN: &str = "Email already exists";

/// Service managing user accounts and their password hashes.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    password_encoder: &'a PasswordEncoder,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `password_encoder` - Hasher for new and changed passwords
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection, password_encoder: &'a PasswordEncoder) -> Self {
        Self {
            db,
            password_encoder,
        }
    }

    /// Lists every account.
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - All users
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }

    /// Gets one account.
    ///
    /// # Arguments
    /// - `id` - User ID
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with this ID
    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Gets an account by its exact username.
    ///
    /// # Arguments
    /// - `username` - Login name
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with this username
    pub async fn get_by_username(&self, username: &str) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    /// Lists the accounts holding a role.
    ///
    /// # Arguments
    /// - `role` - Role to filter by
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - Users with the role
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_by_role(role).await?)
    }

    /// Creates an account, storing an Argon2 hash of the password.
    ///
    /// # Arguments
    /// - `param` - Username, plain password, role, email and optional phone
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Validation)` - Blank username, malformed email or empty password
    /// - `Err(AppError::Conflict)` - Username or email already taken
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        validate_username(&param.username)?;
        validate_email(&param.email)?;
        if param.password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".to_string()));
        }

        let repo = UserRepository::new(self.db);

        if repo.find_by_username(&param.username).await?.is_some() {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }
        if repo.find_by_email(&param.email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.password_encoder.hash(&param.password)?;

        let user = repo
            .create(&param, password_hash)
            .await
            .map_err(|e| AppError::from_write_err(e, "Username or email already exists"))?;

        tracing::info!("Created {:?} account '{}'", user.role, user.username);

        Ok(user)
    }

    /// Applies a partial update.
    ///
    /// Uniqueness of a new username or email is checked against other accounts only. A
    /// non-empty password is re-hashed, an empty one is ignored.
    ///
    /// # Arguments
    /// - `id` - User ID
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::Validation)` - Blank username or malformed email
    /// - `Err(AppError::Conflict)` - Username or email taken by another account
    /// - `Err(AppError::NotFound)` - No user with this ID
    pub async fn update(&self, id: i32, param: UpdateUserParam) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        if let Some(username) = &param.username {
            validate_username(username)?;
            if let Some(other) = repo.find_by_username(username).await? {
                if other.id != id {
                    return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
                }
            }
        }

        if let Some(email) = &param.email {
            validate_email(email)?;
            if let Some(other) = repo.find_by_email(email).await? {
                if other.id != id {
                    return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
                }
            }
        }

        let password_hash = match param.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.password_encoder.hash(password)?),
            _ => None,
        };

        let changes = UserChanges {
            username: param.username,
            password_hash,
            role: param.role,
            email: param.email,
            phone: param.phone,
        };

        repo.update(id, changes)
            .await
            .map_err(|e| AppError::from_write_err(e, "Username or email already exists"))?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes an account that has no appointments as a client.
    ///
    /// # Arguments
    /// - `id` - User ID
    ///
    /// # Returns
    /// - `Ok(())` - The user was deleted
    /// - `Err(AppError::Conflict)` - Appointments still reference the user
    /// - `Err(AppError::NotFound)` - No user with this ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = UserRepository::new(self.db)
            .delete(id)
            .await
            .map_err(|e| AppError::from_delete_err(e, HAS_APPOINTMENTS))?;

        if !deleted {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

fn validate_username(username: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be blank".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.contains('@') {
        return Err(AppError::Validation("Email must contain '@'".to_string()));
    }
    Ok(())
}
