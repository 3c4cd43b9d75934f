use async_trait::async_trait;

use crate::auth::AuthError;

/// Reloads the data a mutation invalidated.
///
/// Implementations must be idempotent: a refetch is always safe to call
/// after a successful mutation of the data it governs.
#[async_trait]
pub trait RefreshSource: Send + Sync {
    async fn refetch(&self) -> Result<(), AuthError>;
}
