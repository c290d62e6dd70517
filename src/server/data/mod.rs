//! Database repository layer for all domain entities.
//!
//! Each repository wraps a connection reference, queries through SeaORM entity models and
//! returns domain models from `server::model`. Nothing above this layer touches entities.

pub mod appointment;
pub mod master;
pub mod report;
pub mod service;
pub mod user;

#[cfg(test)]
mod test;
