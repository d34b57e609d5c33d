//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{Address, DbError, DbResult, Gender, User, WorkStatus};

/// True when the error is a UNIQUE constraint failure.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when the error is a FOREIGN KEY constraint failure.
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Map a duplicate email to `AlreadyExists`, everything else to `Database`.
pub fn map_user_write_error(e: sqlx::Error) -> DbError {
    if is_unique_violation(&e) {
        DbError::AlreadyExists {
            message: "Email already exists".to_string(),
        }
    } else {
        DbError::from(e)
    }
}

/// Check that a user row exists before inserting dependent rows.
pub async fn ensure_user_exists(pool: &sqlx::SqlitePool, user_id: i64) -> DbResult<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(missing_user(user_id))
    }
}

pub fn missing_user(user_id: i64) -> DbError {
    DbError::Constraint {
        message: format!("User ID {} does not exist", user_id),
    }
}

pub fn row_to_user(row: &SqliteRow) -> DbResult<User> {
    let gender: Option<String> = row.get("gender");
    let gender = gender
        .map(|g| g.parse::<Gender>())
        .transpose()
        .map_err(|message| DbError::Database { message })?;

    Ok(User {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        age: row.get("age"),
        gender,
    })
}

pub fn row_to_address(row: &SqliteRow) -> Address {
    Address {
        id: row.get("id"),
        street: row.get("street"),
        city: row.get("city"),
        postal_code: row.get("postal_code"),
        country_code: row.get("country_code"),
        user_id: row.get("user_id"),
    }
}

pub fn row_to_work_status(row: &SqliteRow) -> WorkStatus {
    WorkStatus {
        id: row.get("id"),
        is_home_office: row.get("is_home_office"),
        user_id: row.get("user_id"),
    }
}
