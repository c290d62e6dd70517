//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a client, a master and a service, the three parties every booking needs.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((client, master, service))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_parties(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::master::Model,
        entity::service::Model,
    ),
    DbErr,
> {
    let client = crate::factory::user::create_user(db).await?;
    let master = crate::factory::master::create_master(db).await?;
    let service = crate::factory::service::create_service(db).await?;

    Ok((client, master, service))
}

/// Creates a scheduled appointment along with a fresh client, master and service.
///
/// # Returns
/// - `Ok((client, master, service, appointment))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_appointment_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::master::Model,
        entity::service::Model,
        entity::appointment::Model,
    ),
    DbErr,
> {
    let (client, master, service) = create_booking_parties(db).await?;
    let appointment =
        crate::factory::appointment::create_appointment(db, client.id, master.id, service.id)
            .await?;

    Ok((client, master, service, appointment))
}
