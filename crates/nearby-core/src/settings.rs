//! Key-value settings (flag store).

use async_trait::async_trait;

use crate::error::Result;

/// Repository for persisted boolean flags.
///
/// Keys are plain strings owned by the feature that writes them. There is
/// no way to delete a flag.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the flag stored under `key`, `None` if it was never written.
    async fn get_flag(&self, key: &str) -> Result<Option<bool>>;

    /// Persists `value` under `key`. Returns once the value is durable.
    async fn set_flag(&self, key: &str, value: bool) -> Result<()>;
}
