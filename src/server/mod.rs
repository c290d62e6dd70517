//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations and
//! tower-sessions for cookie sessions stored in the same SQLite database.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and DTO conversion
//! - **Service Layer** (`service/`) - Booking, reporting and account rules
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and authorization guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Database pool and password encoder shared by handlers
//! - **Startup** (`startup`) - Database, migrations, sessions and the bootstrap administrator
//! - **Router** (`router`) - Route table, CORS, request tracing and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Daily report generation
//!
//! # Request Flow
//!
//! 1. **Router** receives the request and routes it to a controller
//! 2. **Controller** resolves the session user through `AuthGuard` and checks the role
//! 3. **Service** validates input and runs the business rules
//! 4. **Data** queries the database and returns domain models
//! 5. **Controller** converts the result to a DTO and responds

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
