//! Binary entry point: load settings, wire storage, analytics, the Rubika
//! dispatcher, and the optional dashboard, then poll until ctrl-c.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use flyzex_bot::services::{AnalyticsTracker, RateLimitGuard};
use flyzex_bot::{Cli, Commands, DmHandlers, GroupHandlers, Settings};
use flyzex_core::{init_tracing, BotApi};
use flyzex_rubika::{Dispatcher, RubikaApi};
use flyzex_storage::{configure_timezone, GuildStore};
use flyzex_webapp::DashboardState;

const CONFIG_PATH: &str = "config/settings.yaml";
const CONFIG_EXAMPLE_PATH: &str = "config/settings.example.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, token } => run(config, token).await,
    }
}

async fn run(config: Option<PathBuf>, token: Option<String>) -> Result<()> {
    let config_path = config.unwrap_or_else(default_config_path);
    let settings = Settings::load(&config_path)
        .with_context(|| format!("loading settings from {}", config_path.display()))?;

    init_tracing(&settings.logging.level, settings.logging.file.as_deref())?;

    if let Err(e) = configure_timezone(&settings.system.timezone) {
        warn!(error = %e, "failed to apply configured timezone; using UTC");
    }

    let store = Arc::new(GuildStore::new(
        settings.storage.path.clone(),
        settings.storage.backup_path.clone(),
    ));
    store.load().await.context("loading guild store")?;

    let owner_id = settings.rubika.owner_id.clone();
    if !store.is_admin(&owner_id).await {
        store.add_admin(&owner_id, None, None).await?;
    }

    let analytics = AnalyticsTracker::new(settings.analytics.flush_interval);
    let analytics_task = analytics.start();

    let rate_limiter = Arc::new(RateLimitGuard::new(
        settings.security.rate_limit_interval,
        settings.security.rate_limit_burst,
    ));

    let token = token
        .or_else(|| settings.bot_token())
        .context("bot token missing: set rubika.bot_token, BOT_TOKEN, or --token")?;
    let api = Arc::new(RubikaApi::new(&token)?);
    let bot_api: Arc<dyn BotApi> = api.clone();

    let dm_handlers = Arc::new(DmHandlers::new(
        Arc::clone(&bot_api),
        Arc::clone(&store),
        analytics.clone(),
        Arc::clone(&rate_limiter),
        owner_id,
        settings.rubika.application_review_chat.clone(),
        settings.webapp_url(),
    ));
    let group_handlers = Arc::new(GroupHandlers::new(
        Arc::clone(&bot_api),
        Arc::clone(&store),
        analytics.clone(),
        &settings.xp,
        &settings.cups,
    ));

    let dispatcher = Dispatcher::new(Arc::clone(&api))
        .add_handler(dm_handlers)
        .add_handler(group_handlers);

    let dashboard_task = if settings.webapp.enabled {
        let state = Arc::new(DashboardState {
            store: Arc::clone(&store),
            admin_key: settings
                .admin_api_key()
                .context("webapp enabled without ADMIN_API_KEY")?,
        });
        let host = settings.webapp.host.clone();
        let port = settings.webapp_port();
        Some(tokio::spawn(async move {
            if let Err(e) = flyzex_webapp::serve(state, &host, port).await {
                tracing::error!(error = %e, "dashboard stopped");
            }
        }))
    } else {
        None
    };

    info!("FlyzexBot is running with polling mode.");
    tokio::select! {
        _ = dispatcher.run_polling() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }

    if let Some(task) = dashboard_task {
        task.abort();
    }
    analytics_task.abort();
    analytics.flush().await;
    store.save().await.context("saving guild store")?;
    Ok(())
}

fn default_config_path() -> PathBuf {
    let primary = Path::new(CONFIG_PATH);
    if primary.exists() {
        primary.to_path_buf()
    } else {
        PathBuf::from(CONFIG_EXAMPLE_PATH)
    }
}
