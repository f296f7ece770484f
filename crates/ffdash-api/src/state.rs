//! Application state for the dashboard API

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ffdash_core::Store;

use crate::error::ApiError;

/// Default cap on upload request bodies (20 MiB)
pub const DEFAULT_UPLOAD_LIMIT: usize = 20 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// League store (one in-memory database per process)
    store: Arc<Store>,
    /// Directory served for `/` and any unmatched path
    public_dir: Option<Arc<PathBuf>>,
    /// Maximum accepted upload body in bytes
    upload_limit: usize,
}

impl AppState {
    /// Create a new AppState around a store
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            public_dir: None,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }

    /// Serve static files from `dir`
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(Arc::new(dir.into()));
        self
    }

    /// Override the upload body limit
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }

    /// Get the store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the store Arc (for sharing)
    pub fn store_arc(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn public_dir(&self) -> Option<&Path> {
        self.public_dir.as_deref().map(PathBuf::as_path)
    }

    pub fn upload_limit(&self) -> usize {
        self.upload_limit
    }

    /// Run store work on the blocking pool
    ///
    /// SQLite calls are synchronous and serialized by the store mutex, so
    /// they are kept off the async workers.
    pub async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Store) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store_arc();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("Store task failed: {}", e)))
    }
}
