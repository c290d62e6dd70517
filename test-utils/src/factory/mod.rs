//! Factory methods for creating test data.
//!
//! Each entity has a `*Factory` builder for customization and a `create_*` shorthand for
//! quick default creation. Factories insert directly through SeaORM, bypassing the service
//! layer, so they can also set up states the services would refuse (such as overlapping
//! bookings for negative tests).
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let client = factory::create_user(db).await?;
//! let master = factory::master::MasterFactory::new(db).experience(7).build().await?;
//! let service = factory::create_service(db).await?;
//! let booking = factory::appointment::AppointmentFactory::new(db, client.id, master.id, service.id)
//!     .date(date)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - accounts of any role
//! - `master` - masters, optionally linked to an account
//! - `service` - catalog entries
//! - `appointment` - bookings
//! - `report` - stored daily reports
//! - `helpers` - entities created together with their dependencies

pub mod appointment;
pub mod helpers;
pub mod master;
pub mod report;
pub mod service;
pub mod user;

pub use appointment::create_appointment;
pub use master::create_master;
pub use report::create_report;
pub use service::create_service;
pub use user::{create_user, create_user_with_role};
