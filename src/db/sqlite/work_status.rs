//! SQLite WorkStatusRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{ensure_user_exists, row_to_work_status};
use crate::db::{DbResult, Id, WorkStatus, WorkStatusRepository};

/// SQLx-backed work status repository.
pub struct SqliteWorkStatusRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> WorkStatusRepository for SqliteWorkStatusRepository<'a> {
    async fn get_by_user_id(&self, user_id: Id) -> DbResult<Option<WorkStatus>> {
        let row = sqlx::query("SELECT id, is_home_office, user_id FROM work_status WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_work_status))
    }

    async fn set(&self, user_id: Id, is_home_office: bool) -> DbResult<WorkStatus> {
        ensure_user_exists(self.pool, user_id).await?;

        let row = sqlx::query(
            "INSERT INTO work_status (is_home_office, user_id) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET is_home_office = excluded.is_home_office
             RETURNING id, is_home_office, user_id",
        )
        .bind(is_home_office)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row_to_work_status(&row))
    }

    async fn count_home_office(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_status WHERE is_home_office = 1")
            .fetch_one(self.pool)
            .await?;
        Ok(count as u64)
    }
}
