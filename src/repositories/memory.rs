//! Process-local user store.
//!
//! Used for development runs without a database and as the storage double
//! in HTTP tests. Ids are assigned sequentially starting at 1 and never reused.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::{StoreError, StoreResult, UserStore};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// In-memory user store guarded by a mutex.
#[derive(Default)]
pub struct MemoryUserStore {
    state: Mutex<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self, operation: &str) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|e| StoreError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("memory store lock poisoned: {}", e),
        })
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let state = self.lock("list users")?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);

        Ok(state.users.values().skip(skip).take(take).cloned().collect())
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let mut state = self.lock("insert user")?;
        state.next_id += 1;

        let user = User {
            id: state.next_id,
            name: new_user.name,
            email: new_user.email,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<User> {
        let state = self.lock("select user")?;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: i64, changes: UpdateUser) -> StoreResult<User> {
        let mut state = self.lock("update user")?;
        let user = state.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        changes.apply_to(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut state = self.lock("delete user")?;
        state
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.lock("ping").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryUserStore::new();

        let first = store.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let second = store.create(new_user("Bob", "bob@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryUserStore::new();
        let first = store.create(new_user("Alice", "alice@example.com")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(new_user("Bob", "bob@example.com")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_applies_limit_and_offset_in_id_order() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .create(new_user(&format!("user{i}"), &format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let page = store.list(2, 1).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(store.list(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_rows_report_not_found() {
        let store = MemoryUserStore::new();

        assert!(matches!(store.get_by_id(42).await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.update(42, UpdateUser { name: Some("x".into()), email: None }).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete(42).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_changes_only_present_fields() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("Alice", "alice@example.com")).await.unwrap();

        let updated = store
            .update(
                user.id,
                UpdateUser {
                    name: None,
                    email: Some("new@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(store.get_by_id(user.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryUserStore::new().ping().await.is_ok());
    }
}
