//! Wire types exchanged with API clients.
//!
//! DTOs live here rather than in the server module so the JSON contract is defined in one
//! place. Localized display names for roles and statuses exist only at this layer.

pub mod api;
pub mod appointment;
pub mod auth;
pub mod master;
pub mod report;
pub mod service;
pub mod statistics;
pub mod transfer;
pub mod user;
