//! Business logic layer.
//!
//! Services validate input, enforce invariants that span rows (unique accounts, free booking
//! slots) and orchestrate repositories. They are role agnostic: access control happens in
//! the controllers before a service is called.

pub mod appointment;
pub mod auth;
pub mod catalog;
pub mod master;
pub mod report;
pub mod statistics;
pub mod transfer;
pub mod user;
