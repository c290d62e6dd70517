//! Salon Test Utils
//!
//! Shared testing utilities for the salon backend. Provides a builder for test contexts
//! backed by in-memory SQLite databases, plus factories for inserting entities with
//! sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection and session
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Builders for users, masters, services, appointments and reports
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn books_an_appointment() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_salon_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (client, master, service) = factory::helpers::create_booking_parties(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
