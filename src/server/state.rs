//! Application state shared across all request handlers.

use sea_orm::DatabaseConnection;

use crate::server::util::password::PasswordEncoder;

/// Shared resources cloned into every handler through Axum's state extraction.
///
/// `DatabaseConnection` is a pool handle, so clones share the pool.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Hashes and verifies passwords; passed explicitly to the services that need it.
    pub password_encoder: PasswordEncoder,
}

impl AppState {
    pub fn new(db: DatabaseConnection, password_encoder: PasswordEncoder) -> Self {
        Self {
            db,
            password_encoder,
        }
    }
}
