use super::*;
use crate::server::{data::service::ServiceRepository, model::service::UpdateServiceParam};

/// Tests that search matches name or description regardless of case, including Cyrillic.
#[tokio::test]
async fn searches_name_and_description_case_insensitively() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Service).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::service::ServiceFactory::new(db)
        .name("Стрижка")
        .description(Some("Мужская и женская".to_string()))
        .build()
        .await?;
    factory::service::ServiceFactory::new(db)
        .name("Manicure")
        .description(Some("Classic HAIR-free care".to_string()))
        .build()
        .await?;
    factory::service::ServiceFactory::new(db)
        .name("Coloring")
        .build()
        .await?;

    let repo = ServiceRepository::new(db);

    let cyrillic = repo.search("СТРИЖ").await?;
    assert_eq!(cyrillic.len(), 1);
    assert_eq!(cyrillic[0].name, "Стрижка");

    let by_description = repo.search("hair").await?;
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].name, "Manicure");

    assert!(repo.search("pedicure").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn updates_price_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Service).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = factory::service::ServiceFactory::new(db)
        .name("Styling")
        .duration(45)
        .build()
        .await?;

    let updated = ServiceRepository::new(db)
        .update(
            service.id,
            UpdateServiceParam {
                price: Some(Decimal::from(1500)),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.price, Decimal::from(1500));
    assert_eq!(updated.duration, 45);
    assert_eq!(updated.name, "Styling");

    Ok(())
}
