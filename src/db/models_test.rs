//! Tests for domain models.

use crate::db::models::*;

#[test]
fn gender_deserializes_from_database_format() {
    let male: Gender = serde_json::from_str("\"male\"").unwrap();
    assert_eq!(male, Gender::Male);

    let other: Gender = serde_json::from_str("\"other\"").unwrap();
    assert_eq!(other, Gender::Other);
}

#[test]
fn gender_parses_case_insensitively() {
    assert_eq!("FEMALE".parse::<Gender>(), Ok(Gender::Female));
    assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
    assert_eq!(" other ".parse::<Gender>(), Ok(Gender::Other));
}

#[test]
fn gender_rejects_unknown_value_with_options() {
    let err = "robot".parse::<Gender>().unwrap_err();
    assert_eq!(
        err,
        "Invalid gender 'robot'. Valid options: male, female, other"
    );
}

#[test]
fn user_serializes_gender_lowercase() {
    let user = User {
        id: 1,
        first_name: "Anna".to_string(),
        last_name: "Schmidt".to_string(),
        email: "anna@example.com".to_string(),
        age: Some(34),
        gender: Some(Gender::Female),
    };

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["gender"], "female");
    assert_eq!(json["age"], 34);
}

#[test]
fn database_stats_display_lists_counts() {
    let stats = DatabaseStats {
        users: 3,
        addresses: 2,
        home_office: 1,
        backend: "SQLite".to_string(),
    };

    let text = stats.to_string();
    assert!(text.contains("Total users: 3"));
    assert!(text.contains("Total addresses: 2"));
    assert!(text.contains("Database: SQLite"));
    assert!(text.ends_with("Status: Active"));
}
