use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Partial unique index guarding against double-booking a master's time slot, the same
/// statement the migration runs.
///
/// Entity-derived schemas carry no partial indexes, so tests that exercise the store-level
/// booking guard add this statement through `with_salon_tables()`.
pub use migration::ACTIVE_SLOT_INDEX_SQL as ACTIVE_SLOT_INDEX;

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` (in foreign key dependency order) and any raw
/// statements with `with_statement()`, then call `build()`.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Master)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements, executed in the order they were added.
    tables: Vec<TableCreateStatement>,
    /// Raw SQL executed after all tables exist.
    statements: Vec<String>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a raw SQL statement to run once the tables are created.
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Adds every salon table in dependency order along with the active slot index.
    ///
    /// Tables: User, Master, Service, Appointment, Report.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_salon_tables(self) -> Self {
        self.with_table(User)
            .with_table(Master)
            .with_table(Service)
            .with_table(Appointment)
            .with_table(Report)
            .with_statement(ACTIVE_SLOT_INDEX)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_statements(self.statements).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
