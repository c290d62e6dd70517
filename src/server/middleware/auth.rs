use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::{Role, User},
};

/// Access levels checked before an endpoint runs.
pub enum Permission {
    /// Any logged in account.
    Authenticated,
    /// Administrators and masters.
    Staff,
    Admin,
}

impl Permission {
    fn allows(&self, role: Role) -> bool {
        match self {
            Self::Authenticated => true,
            Self::Staff => role.is_staff(),
            Self::Admin => role == Role::Administrator,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated access",
            Self::Staff => "staff access",
            Self::Admin => "administrator access",
        }
    }
}

/// Resolves the session identity and checks it against required permissions.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged in user if their role satisfies every permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated and authorized user
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - The session refers to a deleted user
    /// - `Err(AuthError::AccessDenied)` - The role lacks a required permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            if !permission.allows(user.role) {
                return Err(AuthError::AccessDenied(
                    user_id,
                    format!("{:?} lacks {}", user.role, permission.describe()),
                )
                .into());
            }
        }

        Ok(user)
    }

    /// Ensures a user may act on an appointment belonging to `client_id`.
    ///
    /// Staff may act on any appointment, clients only on their own.
    pub fn require_owner_or_staff(user: &User, client_id: i32) -> Result<(), AppError> {
        if user.role.is_staff() || user.id == client_id {
            return Ok(());
        }

        Err(AuthError::AccessDenied(
            user.id,
            format!("client attempted to access appointment of client {}", client_id),
        )
        .into())
    }
}
