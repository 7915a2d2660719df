//! One-time loading of the player SDK

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::OnceCell;

use super::sdk::PlayerSdk;

/// Process-wide owner of the SDK and of its load state.
///
/// Created once in `main` and shared by `Arc`. `ensure_loaded` may be called
/// from any number of waiters; only one load runs at a time and a successful
/// load is never repeated. A failed load leaves the cell empty so a later
/// call can try again.
pub struct ApiBootstrap<S> {
    sdk: S,
    loaded: OnceCell<()>,
}

impl<S: PlayerSdk> ApiBootstrap<S> {
    pub fn new(sdk: S) -> Arc<Self> {
        Arc::new(Self {
            sdk,
            loaded: OnceCell::new(),
        })
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.initialized()
    }

    pub async fn ensure_loaded(&self) -> Result<()> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::info!("Loading player API");
                let result = self.sdk.load_api().await;
                match &result {
                    Ok(()) => tracing::info!("Player API ready"),
                    Err(e) => tracing::warn!(error = %e, "Player API failed to load"),
                }
                result
            })
            .await?;
        Ok(())
    }
}
