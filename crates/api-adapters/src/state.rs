//! State shared across all request handlers.

use std::sync::Arc;

use domains::ports::{AccessPolicy, IdentityProvider};
use services::ContentService;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    pub fn new(
        content: Arc<ContentService>,
        identity: Arc<dyn IdentityProvider>,
        policy: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            content,
            identity,
            policy,
        }
    }
}
