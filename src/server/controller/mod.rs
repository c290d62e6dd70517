//! HTTP request handlers.
//!
//! Each handler authorizes the caller through `AuthGuard`, converts the request DTO into
//! server parameters, calls a service and converts the result back into a DTO.

pub mod appointment;
pub mod auth;
pub mod master;
pub mod report;
pub mod service;
pub mod statistics;
pub mod transfer;
pub mod user;

#[cfg(test)]
mod test;
