use jira_field_sync::config::{parse_var, ConfigError};
use jira_field_sync::{field_options, Config, JiraClient, OptionsManifest};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jira_field_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let manifest_path = env::var("JIRA_OPTIONS_MANIFEST")
        .map(PathBuf::from)
        .map_err(|_| ConfigError::Missing("JIRA_OPTIONS_MANIFEST"))?;
    let interval: Option<u64> = parse_var("JIRA_SYNC_INTERVAL_SECS")?;

    let jira_client = JiraClient::new(&config)?;
    tracing::info!("Syncing options against {}", jira_client.base_url());

    let Some(interval) = interval else {
        sync_options(&jira_client, &manifest_path).await?;
        return Ok(());
    };

    loop {
        if let Err(e) = sync_options(&jira_client, &manifest_path).await {
            tracing::error!("Error syncing options: {}", e);
        }

        tracing::info!("Sleeping for {} seconds...", interval);
        tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
    }
}

async fn sync_options(jira_client: &JiraClient, manifest_path: &Path) -> jira_field_sync::Result<()> {
    let manifest = OptionsManifest::load(manifest_path)?;

    let resolved = field_options::reconcile(
        jira_client,
        &manifest.field_id,
        &manifest.context_id,
        &manifest.options,
    )
    .await?;

    for option in &resolved {
        tracing::info!(
            "Option {}: {}",
            option.id.as_deref().unwrap_or_default(),
            option.value
        );
    }
    tracing::info!(
        "Options of {}:{} are in sync ({} total)",
        manifest.field_id,
        manifest.context_id,
        resolved.len()
    );
    Ok(())
}
