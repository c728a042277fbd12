use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the credential produced by the last successful demo generation.
///
/// Empty until the first generation, never cleared afterwards. Concurrent
/// writers are last-write-wins; each read sees a whole value.
#[derive(Debug, Clone, Default)]
pub struct DemoCredentialSlot {
    inner: Arc<RwLock<Option<Value>>>,
}

impl DemoCredentialSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored credential.
    pub async fn store(&self, credential: Value) {
        *self.inner.write().await = Some(credential);
    }

    pub async fn current(&self) -> Option<Value> {
        self.inner.read().await.clone()
    }
}
