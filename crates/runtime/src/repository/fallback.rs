//! Two-backend store that retries failed calls on a secondary backend.

use async_trait::async_trait;

use crate::repository::{KeyValueStore, RepositoryError, Result, StoreMap};

/// Routes every call to `primary`, retrying the same call on `secondary` when
/// the primary fails.
///
/// Both backends are treated as interchangeable: there is no replication
/// between them and the last successful write wins. When both fail the error
/// carries both causes.
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackStore<P, S>
where
    P: KeyValueStore,
    S: KeyValueStore,
{
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

fn exhausted(primary: RepositoryError, secondary: RepositoryError) -> RepositoryError {
    tracing::error!("Secondary storage failed as well: {}", secondary);
    RepositoryError::BackendsExhausted {
        primary: Box::new(primary),
        secondary: Box::new(secondary),
    }
}

#[async_trait]
impl<P, S> KeyValueStore for FallbackStore<P, S>
where
    P: KeyValueStore,
    S: KeyValueStore,
{
    async fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        match self.primary.get(keys).await {
            Ok(entries) => Ok(entries),
            Err(primary) => {
                tracing::warn!("Primary storage get failed, trying secondary: {}", primary);
                self.secondary
                    .get(keys)
                    .await
                    .map_err(|secondary| exhausted(primary, secondary))
            }
        }
    }

    async fn set(&self, items: StoreMap) -> Result<()> {
        // The primary consumes its batch, so keep a copy for the retry.
        match self.primary.set(items.clone()).await {
            Ok(()) => Ok(()),
            Err(primary) => {
                tracing::warn!("Primary storage set failed, trying secondary: {}", primary);
                self.secondary
                    .set(items)
                    .await
                    .map_err(|secondary| exhausted(primary, secondary))
            }
        }
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        match self.primary.remove(keys).await {
            Ok(()) => Ok(()),
            Err(primary) => {
                tracing::warn!("Primary storage remove failed, trying secondary: {}", primary);
                self.secondary
                    .remove(keys)
                    .await
                    .map_err(|secondary| exhausted(primary, secondary))
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        match self.primary.clear().await {
            Ok(()) => Ok(()),
            Err(primary) => {
                tracing::warn!("Primary storage clear failed, trying secondary: {}", primary);
                self.secondary
                    .clear()
                    .await
                    .map_err(|secondary| exhausted(primary, secondary))
            }
        }
    }
}
