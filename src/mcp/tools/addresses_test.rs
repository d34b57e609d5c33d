//! Tests for the address tools.

use rmcp::handler::server::wrapper::Parameters;
use serde_json::Value;

use crate::db::{AddressRepository, Database, Id, NewUser, SqliteDatabase, UserRepository};
use crate::mcp::server::EmployeeServer;
use crate::mcp::tools::result_text;
use crate::mcp::tools::{AddAddressParams, AddressIdParams, UpdateAddressParams};

async fn setup_server() -> (EmployeeServer<SqliteDatabase>, Id) {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Failed to run migrations");

    let user = db
        .users()
        .create(&NewUser {
            first_name: "Erika".to_string(),
            last_name: "Mustermann".to_string(),
            email: "erika@example.com".to_string(),
            age: 29,
            gender: None,
        })
        .await
        .expect("Failed to create user");

    (EmployeeServer::new(db), user.id)
}

fn add_params(user_id: Id, country_code: &str) -> Parameters<AddAddressParams> {
    Parameters(AddAddressParams {
        street: "Hauptstraße 1".to_string(),
        city: "Bonn".to_string(),
        postal_code: "53111".to_string(),
        country_code: country_code.to_string(),
        user_id,
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn add_address_normalizes_country_code() {
    let (server, user_id) = setup_server().await;

    let result = server.add_address(add_params(user_id, "de")).await.unwrap();
    assert_eq!(result_text(&result), "Address 'Hauptstraße 1, Bonn' added");

    let addresses = server.db().addresses().list().await.unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].country_code, "DE");
    assert_eq!(addresses[0].user_id, user_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_address_rejects_unknown_country() {
    let (server, user_id) = setup_server().await;

    let result = server.add_address(add_params(user_id, "XX")).await.unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).starts_with("Invalid country code 'XX'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_address_rejects_unknown_user() {
    let (server, user_id) = setup_server().await;

    let result = server
        .add_address(add_params(user_id + 100, "DE"))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(server.db().addresses().count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn find_address_by_id() {
    let (server, user_id) = setup_server().await;
    server.add_address(add_params(user_id, "DE")).await.unwrap();
    let id = server.db().addresses().list().await.unwrap()[0].id;

    let result = server
        .find_address_by_id(Parameters(AddressIdParams { address_id: id }))
        .await
        .unwrap();
    let address: Value = serde_json::from_str(result_text(&result)).unwrap();
    assert_eq!(address["city"], "Bonn");
    assert_eq!(address["postal_code"], "53111");

    let result = server
        .find_address_by_id(Parameters(AddressIdParams { address_id: id + 1 }))
        .await
        .unwrap();
    assert_eq!(result_text(&result), "null");
}

#[tokio::test(flavor = "multi_thread")]
async fn find_all_addresses_lists_rows() {
    let (server, user_id) = setup_server().await;

    let result = server.find_all_addresses().await.unwrap();
    assert_eq!(result_text(&result), "[]");

    server.add_address(add_params(user_id, "DE")).await.unwrap();
    server.add_address(add_params(user_id, "AT")).await.unwrap();

    let result = server.find_all_addresses().await.unwrap();
    let addresses: Value = serde_json::from_str(result_text(&result)).unwrap();
    assert_eq!(addresses.as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_address_keeps_missing_fields() {
    let (server, user_id) = setup_server().await;
    server.add_address(add_params(user_id, "DE")).await.unwrap();
    let id = server.db().addresses().list().await.unwrap()[0].id;

    let result = server
        .update_address(Parameters(UpdateAddressParams {
            address_id: id,
            street: None,
            city: Some("Köln".to_string()),
            postal_code: None,
            country_code: None,
        }))
        .await
        .unwrap();
    assert_eq!(result_text(&result), format!("Address ID {} updated", id));

    let address = server.db().addresses().get(id).await.unwrap();
    assert_eq!(address.street, "Hauptstraße 1");
    assert_eq!(address.city, "Köln");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_unknown_ids() {
    let (server, _) = setup_server().await;

    let result = server
        .update_address(Parameters(UpdateAddressParams {
            address_id: 99,
            street: Some("Gartenweg 2".to_string()),
            city: None,
            postal_code: None,
            country_code: None,
        }))
        .await
        .unwrap();
    assert_eq!(result_text(&result), "Address ID 99 not found");

    let result = server
        .delete_address_by_id(Parameters(AddressIdParams { address_id: 99 }))
        .await
        .unwrap();
    assert_eq!(result_text(&result), "Address ID 99 not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_address_by_id() {
    let (server, user_id) = setup_server().await;
    server.add_address(add_params(user_id, "DE")).await.unwrap();
    let id = server.db().addresses().list().await.unwrap()[0].id;

    let result = server
        .delete_address_by_id(Parameters(AddressIdParams { address_id: id }))
        .await
        .unwrap();

    assert_eq!(result_text(&result), format!("Address ID {} deleted", id));
    assert_eq!(server.db().addresses().count().await.unwrap(), 0);
}
