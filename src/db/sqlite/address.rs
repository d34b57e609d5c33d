//! SQLite AddressRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{ensure_user_exists, is_foreign_key_violation, missing_user, row_to_address};
use crate::db::{Address, AddressChanges, AddressRepository, DbError, DbResult, Id, NewAddress};

/// SQLx-backed address repository.
pub struct SqliteAddressRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> AddressRepository for SqliteAddressRepository<'a> {
    async fn list(&self) -> DbResult<Vec<Address>> {
        let rows = sqlx::query(
            "SELECT id, street, city, postal_code, country_code, user_id FROM addresses ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_address).collect())
    }

    async fn get(&self, id: Id) -> DbResult<Address> {
        let row = sqlx::query(
            "SELECT id, street, city, postal_code, country_code, user_id FROM addresses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref()
            .map(row_to_address)
            .ok_or_else(|| DbError::not_found("Address", "id", id))
    }

    async fn get_by_user_id(&self, user_id: Id) -> DbResult<Option<Address>> {
        let row = sqlx::query(
            "SELECT id, street, city, postal_code, country_code, user_id FROM addresses
             WHERE user_id = ? ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_address))
    }

    async fn create(&self, address: &NewAddress) -> DbResult<Address> {
        ensure_user_exists(self.pool, address.user_id).await?;

        let result = sqlx::query(
            "INSERT INTO addresses (street, city, postal_code, country_code, user_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.postal_code)
        .bind(&address.country_code)
        .bind(address.user_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            // The user may vanish between the check and the insert
            if is_foreign_key_violation(&e) {
                missing_user(address.user_id)
            } else {
                DbError::from(e)
            }
        })?;

        Ok(Address {
            id: result.last_insert_rowid(),
            street: address.street.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country_code: address.country_code.clone(),
            user_id: address.user_id,
        })
    }

    async fn update(&self, id: Id, changes: &AddressChanges) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE addresses SET
                street = COALESCE(?, street),
                city = COALESCE(?, city),
                postal_code = COALESCE(?, postal_code),
                country_code = COALESCE(?, country_code)
             WHERE id = ?",
        )
        .bind(changes.street.as_deref())
        .bind(changes.city.as_deref())
        .bind(changes.postal_code.as_deref())
        .bind(changes.country_code.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Id) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
            .fetch_one(self.pool)
            .await?;
        Ok(count as u64)
    }
}
