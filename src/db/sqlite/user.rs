//! SQLite UserRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{map_user_write_error, row_to_user};
use crate::db::{DbError, DbResult, Id, NewUser, User, UserChanges, UserRepository};

const USER_COLUMNS: &str = "id, first_name, last_name, email, age, gender";

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn list(&self) -> DbResult<Vec<User>> {
        let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get(&self, id: Id) -> DbResult<User> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::not_found("User", "id", id))?;
        row_to_user(&row)
    }

    async fn get_by_last_name(&self, last_name: &str) -> DbResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE last_name = ? ORDER BY id LIMIT 1",
            USER_COLUMNS
        ))
        .bind(last_name)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: &NewUser) -> DbResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, age, gender) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.age)
        .bind(user.gender.map(|g| g.as_str()))
        .execute(self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(User {
            id: result.last_insert_rowid(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            age: Some(user.age),
            gender: user.gender,
        })
    }

    async fn update_by_last_name(&self, last_name: &str, changes: &UserChanges) -> DbResult<bool> {
        let Some(existing) = self.get_by_last_name(last_name).await? else {
            return Ok(false);
        };

        // COALESCE keeps the stored value for every change left as None
        sqlx::query(
            "UPDATE users SET
                first_name = COALESCE(?, first_name),
                email = COALESCE(?, email),
                age = COALESCE(?, age),
                gender = COALESCE(?, gender)
             WHERE id = ?",
        )
        .bind(changes.first_name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.age)
        .bind(changes.gender.map(|g| g.as_str()))
        .bind(existing.id)
        .execute(self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(true)
    }

    async fn delete_by_last_name(&self, last_name: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE last_name = ?")
            .bind(last_name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM users").execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count as u64)
    }
}
