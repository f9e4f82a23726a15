//! Storage layer for user records.
//!
//! Handlers talk to storage only through the [`UserStore`] trait so the
//! backing engine can be swapped (Postgres in production, in-memory for
//! development and tests).

mod error;
mod memory;
mod user_repo;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryUserStore;
pub use user_repo::PgUserStore;

use async_trait::async_trait;

use crate::models::{NewUser, UpdateUser, User};

/// Storage collaborator for user records.
///
/// Every id-addressed operation reports a missing row as
/// [`StoreError::NotFound`], distinct from all other failures.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lists users ordered by id, skipping `offset` rows and returning at most `limit`.
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>>;

    /// Persists a new user and returns it with its assigned id.
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// Fetches a single user.
    async fn get_by_id(&self, id: i64) -> StoreResult<User>;

    /// Applies the present fields of `changes` and returns the updated user.
    async fn update(&self, id: i64, changes: UpdateUser) -> StoreResult<User>;

    /// Removes a user.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
