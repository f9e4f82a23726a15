//! Application state shared with every handler.

use std::sync::Arc;

use crate::repositories::UserStore;

/// Cloning is cheap: the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
