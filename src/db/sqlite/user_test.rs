//! Tests for SqliteUserRepository.

use crate::db::{
    AddressRepository, Database, DbError, Gender, NewAddress, NewUser, SqliteDatabase,
    UserChanges, UserRepository, WorkStatusRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn new_user(first_name: &str, last_name: &str, email: &str) -> NewUser {
    NewUser {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        age: 30,
        gender: Some(Gender::Male),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_user() {
    let db = setup_db().await;
    let repo = db.users();

    let created = repo
        .create(&new_user("John", "Doe", "john.doe@example.com"))
        .await
        .expect("Create should succeed");
    assert_eq!(created.id, 1);

    let retrieved = repo.get(created.id).await.expect("Get should succeed");
    assert_eq!(retrieved, created);
    assert_eq!(retrieved.gender, Some(Gender::Male));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_user_returns_not_found() {
    let db = setup_db().await;

    let result = db.users().get(42).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn gender_may_be_null() {
    let db = setup_db().await;
    let repo = db.users();

    let user = repo
        .create(&NewUser {
            gender: None,
            ..new_user("Jane", "Roe", "jane@example.com")
        })
        .await
        .unwrap();

    let retrieved = repo.get(user.id).await.unwrap();
    assert_eq!(retrieved.age, Some(30));
    assert_eq!(retrieved.gender, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected() {
    let db = setup_db().await;
    let repo = db.users();

    repo.create(&new_user("John", "Doe", "dup@example.com"))
        .await
        .unwrap();
    let err = repo
        .create(&new_user("Jim", "Other", "dup@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::AlreadyExists { .. }));
    assert!(err.to_string().contains("Email already exists"));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_ordered_by_id() {
    let db = setup_db().await;
    let repo = db.users();

    for (i, name) in ["Charlie", "Alpha", "Bravo"].iter().enumerate() {
        repo.create(&new_user("X", name, &format!("{}@example.com", i)))
            .await
            .unwrap();
    }

    let users = repo.list().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.last_name.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Alpha", "Bravo"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_by_last_name_returns_first_match() {
    let db = setup_db().await;
    let repo = db.users();

    let first = repo
        .create(&new_user("Anna", "Schmidt", "anna@example.com"))
        .await
        .unwrap();
    repo.create(&new_user("Bernd", "Schmidt", "bernd@example.com"))
        .await
        .unwrap();

    let found = repo.get_by_last_name("Schmidt").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(first.id));

    let missing = repo.get_by_last_name("Meier").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_applies_only_given_fields() {
    let db = setup_db().await;
    let repo = db.users();

    repo.create(&new_user("John", "Doe", "john@example.com"))
        .await
        .unwrap();

    let changes = UserChanges {
        first_name: Some("Johnny".to_string()),
        age: Some(31),
        ..Default::default()
    };
    let updated = repo.update_by_last_name("Doe", &changes).await.unwrap();
    assert!(updated);

    let user = repo.get_by_last_name("Doe").await.unwrap().unwrap();
    assert_eq!(user.first_name, "Johnny");
    assert_eq!(user.age, Some(31));
    assert_eq!(user.email, "john@example.com");
    assert_eq!(user.gender, Some(Gender::Male));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_last_name_returns_false() {
    let db = setup_db().await;

    let updated = db
        .users()
        .update_by_last_name("Nobody", &UserChanges::default())
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_to_taken_email_is_rejected() {
    let db = setup_db().await;
    let repo = db.users();

    repo.create(&new_user("John", "Doe", "john@example.com"))
        .await
        .unwrap();
    repo.create(&new_user("Jane", "Roe", "jane@example.com"))
        .await
        .unwrap();

    let changes = UserChanges {
        email: Some("john@example.com".to_string()),
        ..Default::default()
    };
    let err = repo.update_by_last_name("Roe", &changes).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadyExists { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_by_last_name_cascades() {
    let db = setup_db().await;
    let user = db
        .users()
        .create(&new_user("John", "Doe", "john@example.com"))
        .await
        .unwrap();

    db.addresses()
        .create(&NewAddress {
            street: "Main St 1".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country_code: "US".to_string(),
            user_id: user.id,
        })
        .await
        .unwrap();
    db.work_statuses().set(user.id, true).await.unwrap();

    assert!(db.users().delete_by_last_name("Doe").await.unwrap());
    assert!(!db.users().delete_by_last_name("Doe").await.unwrap());

    assert_eq!(db.addresses().count().await.unwrap(), 0);
    assert!(db.work_statuses().get_by_user_id(user.id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_all_reports_count() {
    let db = setup_db().await;
    let repo = db.users();

    for i in 0..3 {
        repo.create(&new_user("X", "Y", &format!("x{}@example.com", i)))
            .await
            .unwrap();
    }

    assert_eq!(repo.delete_all().await.unwrap(), 3);
    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.delete_all().await.unwrap(), 0);
}
