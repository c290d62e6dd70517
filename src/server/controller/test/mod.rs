//! Handler tests. Each test calls the handler functions directly with a session that has a
//! user of the role under test logged in, so role policy is checked the way a request sees it.

mod appointment;
mod transfer;

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use test_utils::{builder::TestBuilder, context::TestContext, factory};
use tower_sessions::Session;

use crate::server::{
    error::AppError, middleware::session::AuthSession, state::AppState,
    util::password::PasswordEncoder,
};

/// Application state plus a session, backed by a fresh salon schema.
struct HandlerTest {
    /// Owns the in-memory database and session store.
    _context: TestContext,
    db: DatabaseConnection,
    session: Session,
    state: AppState,
}

impl HandlerTest {
    async fn new() -> Self {
        let mut context = TestBuilder::new().with_salon_tables().build().await.unwrap();
        let (db, session) = context.db_and_session().await.unwrap();
        let (db, session) = (db.clone(), session.clone());
        let state = AppState::new(db.clone(), PasswordEncoder::fast());

        Self {
            _context: context,
            db,
            session,
            state,
        }
    }

    /// Creates an account with the role and stores it in the session.
    async fn login_as(&self, role: UserRole) -> Result<entity::user::Model, AppError> {
        let user = factory::create_user_with_role(&self.db, role).await?;
        AuthSession::new(&self.session).set_user_id(user.id).await?;

        Ok(user)
    }
}

/// Renders a handler result and decodes its JSON body.
async fn json_body<T: DeserializeOwned>(response: impl IntoResponse) -> (StatusCode, T) {
    let response = response.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}
