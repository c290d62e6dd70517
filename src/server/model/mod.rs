//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into the types defined here, services operate on
//! them, and controllers convert them into DTOs. Partial updates use `Update*Param` structs
//! whose `Option` fields mark what the caller supplied.

pub mod appointment;
pub mod master;
pub mod report;
pub mod service;
pub mod user;
