//! Postgres-backed user store using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::DatabaseErrorConverter;
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::{StoreError, StoreResult, UserStore};

/// User store holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserStore {
    pool: AsyncDbPool,
}

impl PgUserStore {
    /// Creates a new PgUserStore with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> StoreResult<PooledConnection<'_, AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .map_err(DatabaseErrorConverter::convert_pool_error)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.connection().await?;

        users
            .order(id.asc())
            .limit(limit)
            .offset(offset)
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.connection().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn get_by_id(&self, user_id: i64) -> StoreResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.connection().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select user"))
    }

    async fn update(&self, user_id: i64, changes: UpdateUser) -> StoreResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.connection().await?;

        // A changeset without fields is a query builder error in diesel
        if changes.is_empty() {
            return Err(StoreError::Database {
                operation: "update user".to_string(),
                source: anyhow::anyhow!("no columns to update"),
            });
        }

        // No matching row surfaces as diesel's NotFound from get_result
        diesel::update(users.filter(id.eq(user_id)))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))
    }

    async fn delete(&self, user_id: i64) -> StoreResult<()> {
        use crate::schema::users::dsl::*;
        let mut conn = self.connection().await?;

        let affected = diesel::delete(users.filter(id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))?;

        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "ping"))
    }
}
