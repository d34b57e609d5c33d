//! Tests for SqliteAddressRepository.

use crate::db::{
    AddressChanges, AddressRepository, Database, DbError, NewAddress, NewUser, SqliteDatabase,
    UserRepository,
};

async fn setup_db() -> (SqliteDatabase, i64) {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");

    let user = db
        .users()
        .create(&NewUser {
            first_name: "Max".to_string(),
            last_name: "Mustermann".to_string(),
            email: "max@example.com".to_string(),
            age: 44,
            gender: None,
        })
        .await
        .expect("Create user should succeed");

    (db, user.id)
}

fn new_address(user_id: i64) -> NewAddress {
    NewAddress {
        street: "Hauptstraße 1".to_string(),
        city: "Berlin".to_string(),
        postal_code: "10115".to_string(),
        country_code: "DE".to_string(),
        user_id,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_address() {
    let (db, user_id) = setup_db().await;
    let repo = db.addresses();

    let created = repo.create(&new_address(user_id)).await.unwrap();
    let retrieved = repo.get(created.id).await.unwrap();

    assert_eq!(retrieved, created);
    assert_eq!(retrieved.user_id, user_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_for_unknown_user_is_constraint_error() {
    let (db, _) = setup_db().await;

    let err = db.addresses().create(&new_address(999)).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint { .. }));
    assert_eq!(err.user_message(), "User ID 999 does not exist");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_address_returns_not_found() {
    let (db, _) = setup_db().await;

    let result = db.addresses().get(7).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_by_user_id_returns_first_address() {
    let (db, user_id) = setup_db().await;
    let repo = db.addresses();

    let first = repo.create(&new_address(user_id)).await.unwrap();
    repo.create(&NewAddress {
        city: "Hamburg".to_string(),
        ..new_address(user_id)
    })
    .await
    .unwrap();

    let found = repo.get_by_user_id(user_id).await.unwrap();
    assert_eq!(found, Some(first));
    assert!(repo.get_by_user_id(user_id + 1).await.unwrap().is_none());
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_applies_only_given_fields() {
    let (db, user_id) = setup_db().await;
    let repo = db.addresses();
    let address = repo.create(&new_address(user_id)).await.unwrap();

    let changes = AddressChanges {
        city: Some("München".to_string()),
        country_code: Some("AT".to_string()),
        ..Default::default()
    };
    assert!(repo.update(address.id, &changes).await.unwrap());

    let updated = repo.get(address.id).await.unwrap();
    assert_eq!(updated.city, "München");
    assert_eq!(updated.country_code, "AT");
    assert_eq!(updated.street, "Hauptstraße 1");
    assert_eq!(updated.postal_code, "10115");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_returns_false() {
    let (db, _) = setup_db().await;

    let updated = db
        .addresses()
        .update(123, &AddressChanges::default())
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_address() {
    let (db, user_id) = setup_db().await;
    let repo = db.addresses();
    let address = repo.create(&new_address(user_id)).await.unwrap();

    assert!(repo.delete(address.id).await.unwrap());
    assert!(!repo.delete(address.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
}
