use super::*;
use crate::server::{
    data::master::MasterRepository,
    model::master::{CreateMasterParam, UpdateMasterParam},
};

#[tokio::test]
async fn creates_and_finds_master_by_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Master)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_user(db).await?;

    let repo = MasterRepository::new(db);
    let master = repo
        .create(CreateMasterParam {
            name: "Olga".to_string(),
            specialization: Some("Manicure".to_string()),
            experience: 5,
            rating: Decimal::from(4),
            user_id: Some(account.id),
        })
        .await?;

    let found = repo.find_by_user_id(account.id).await?.unwrap();

    assert_eq!(found.id, master.id);
    assert_eq!(found.name, "Olga");
    assert_eq!(found.experience, 5);
    assert!(repo.find_by_user_id(account.id + 1).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn lists_masters_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Master)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::master::MasterFactory::new(db).name("Zoya").build().await?;
    factory::master::MasterFactory::new(db).name("Alla").build().await?;

    let masters = MasterRepository::new(db).get_all().await?;

    let names: Vec<_> = masters.into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["Alla", "Zoya"]);

    Ok(())
}

#[tokio::test]
async fn patches_master() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Master)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let master = factory::master::MasterFactory::new(db)
        .name("Irina")
        .experience(2)
        .build()
        .await?;

    let repo = MasterRepository::new(db);
    let updated = repo
        .update(
            master.id,
            UpdateMasterParam {
                experience: Some(10),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.experience, 10);
    assert_eq!(updated.name, "Irina");
    assert!(repo.delete(master.id).await?);
    assert!(repo.find_by_id(master.id).await?.is_none());

    Ok(())
}
