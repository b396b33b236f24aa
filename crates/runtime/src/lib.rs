use std::sync::Arc;

use anyhow::{Context, Result};
use nutri_auth::{AuthProvider, SupabaseAuthenticator};
use nutri_config::AppConfig;
use nutri_database::SupabaseClient;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::EnvFilter;

    /// Install the global fmt subscriber. `RUST_LOG` selects the filter,
    /// defaulting to `info`. Fails if a subscriber is already installed.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Handles to the hosted backend shared by every request
#[derive(Clone)]
pub struct BackendServices {
    pub supabase: SupabaseClient,
    pub authenticator: Arc<dyn AuthProvider>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let supabase =
            SupabaseClient::new(&config.supabase).context("failed to create store client")?;

        if config.supabase.api_key.is_empty() {
            tracing::warn!("supabase api key is empty; requests will be anonymous");
        }

        let authenticator: Arc<dyn AuthProvider> =
            Arc::new(SupabaseAuthenticator::new(supabase.clone()));

        info!(url = %supabase.base_url(), "backend services ready");
        Ok(Self {
            supabase,
            authenticator,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
