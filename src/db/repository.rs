//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Futures are `Send` so handlers generic over `Database` can run on a
//! multi-threaded runtime.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{
        Address, AddressChanges, DatabaseStats, Id, NewAddress, NewUser, User, UserChanges,
        WorkStatus,
    },
};

/// Repository for User operations.
pub trait UserRepository {
    /// Get all users ordered by ID.
    fn list(&self) -> impl Future<Output = DbResult<Vec<User>>> + Send;

    /// Get a user by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<User>> + Send;

    /// Get the first user with the given last name.
    fn get_by_last_name(&self, last_name: &str)
    -> impl Future<Output = DbResult<Option<User>>> + Send;

    /// Create a new user. Fails with `AlreadyExists` on a duplicate email.
    fn create(&self, user: &NewUser) -> impl Future<Output = DbResult<User>> + Send;

    /// Apply changes to the first user with the given last name.
    /// Returns `false` when no such user exists.
    fn update_by_last_name(
        &self,
        last_name: &str,
        changes: &UserChanges,
    ) -> impl Future<Output = DbResult<bool>> + Send;

    /// Delete every user with the given last name.
    /// Returns `false` when nothing was deleted.
    fn delete_by_last_name(&self, last_name: &str) -> impl Future<Output = DbResult<bool>> + Send;

    /// Delete all users, returning how many were removed.
    fn delete_all(&self) -> impl Future<Output = DbResult<u64>> + Send;

    /// Number of users.
    fn count(&self) -> impl Future<Output = DbResult<u64>> + Send;
}

/// Repository for Address operations.
pub trait AddressRepository {
    /// Get all addresses ordered by ID.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Address>>> + Send;

    /// Get an address by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Address>> + Send;

    /// Get the first address of a user.
    fn get_by_user_id(&self, user_id: Id) -> impl Future<Output = DbResult<Option<Address>>> + Send;

    /// Create a new address. Fails with `Constraint` when the user does not exist.
    fn create(&self, address: &NewAddress) -> impl Future<Output = DbResult<Address>> + Send;

    /// Apply changes to an address. Returns `false` when the ID is unknown.
    fn update(
        &self,
        id: Id,
        changes: &AddressChanges,
    ) -> impl Future<Output = DbResult<bool>> + Send;

    /// Delete an address. Returns `false` when the ID is unknown.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<bool>> + Send;

    /// Number of addresses.
    fn count(&self) -> impl Future<Output = DbResult<u64>> + Send;
}

/// Repository for WorkStatus operations.
pub trait WorkStatusRepository {
    /// Get the work status of a user, if one was recorded.
    fn get_by_user_id(
        &self,
        user_id: Id,
    ) -> impl Future<Output = DbResult<Option<WorkStatus>>> + Send;

    /// Insert or update the work status of a user.
    fn set(
        &self,
        user_id: Id,
        is_home_office: bool,
    ) -> impl Future<Output = DbResult<WorkStatus>> + Send;

    /// Number of users currently working from home.
    fn count_home_office(&self) -> impl Future<Output = DbResult<u64>> + Send;
}

/// Combined database interface.
///
/// Repositories are exposed through associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Users<'a>: UserRepository + Send + Sync
    where
        Self: 'a;
    type Addresses<'a>: AddressRepository + Send + Sync
    where
        Self: 'a;
    type WorkStatuses<'a>: WorkStatusRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete all rows from all tables.
    fn purge(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Row counts across the schema.
    fn stats(&self) -> impl Future<Output = DbResult<DatabaseStats>> + Send;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;

    /// Get the address repository.
    fn addresses(&self) -> Self::Addresses<'_>;

    /// Get the work status repository.
    fn work_statuses(&self) -> Self::WorkStatuses<'_>;
}
