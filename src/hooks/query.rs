use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::auth::{AuthClient, AuthError};
use crate::lifecycle::RefreshSource;

/// Fetches one value from the auth client.
#[async_trait]
pub trait Loader<T>: Send + Sync {
    /// Short label used in log lines.
    fn describe(&self) -> String;

    async fn load(&self, client: &dyn AuthClient) -> Result<T, AuthError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// True until the first load settles.
    pub is_pending: bool,
    pub data: Option<T>,
    /// Error of the most recent load, cleared by the next success.
    pub error: Option<AuthError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            is_pending: true,
            data: None,
            error: None,
        }
    }
}

/// Query state plus the sequence numbers of issued and applied loads.
struct Slot<T> {
    state: QueryState<T>,
    issued: u64,
    applied: u64,
}

/// Shared, refetchable result of a [`Loader`].
///
/// Overlapping refetches may settle in any order; only a load started after
/// the last applied one may overwrite it.
pub struct Query<T> {
    client: Arc<dyn AuthClient>,
    loader: Arc<dyn Loader<T>>,
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            loader: Arc::clone(&self.loader),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Clone + Send + 'static> Query<T> {
    pub fn new(client: Arc<dyn AuthClient>, loader: impl Loader<T> + 'static) -> Self {
        Self {
            client,
            loader: Arc::new(loader),
            slot: Arc::new(Mutex::new(Slot {
                state: QueryState::default(),
                issued: 0,
                applied: 0,
            })),
        }
    }

    /// Reloads the value. On failure the previous data is kept and the
    /// error is recorded. A load overtaken by a newer one is discarded.
    pub async fn refetch(&self) -> Result<(), AuthError> {
        let sequence = {
            let mut slot = self.lock();
            slot.issued += 1;
            slot.issued
        };
        log::debug!("Loading {} (#{sequence})", self.loader.describe());
        let result = self.loader.load(self.client.as_ref()).await;

        let mut slot = self.lock();
        if sequence < slot.applied {
            log::debug!("Discarding stale load #{sequence} of {}", self.loader.describe());
            return result.map(|_| ());
        }
        slot.applied = sequence;

        let state = &mut slot.state;
        state.is_pending = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to load {}: {err}", self.loader.describe());
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.lock().state.clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().state.data.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.is_pending
    }

    pub fn error(&self) -> Option<AuthError> {
        self.lock().state.error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> RefreshSource for Query<T> {
    async fn refetch(&self) -> Result<(), AuthError> {
        Query::refetch(self).await
    }
}
