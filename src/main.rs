mod bot;
mod config;
mod data;
mod error;
mod interaction;
mod platform;
mod scheduler;
mod service;
mod startup;

use serenity::http::Http;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::interaction::router::InteractionRouter;
use crate::platform::discord::DiscordPlatform;
use crate::platform::ChatPlatform;
use crate::scheduler::ActionScheduler;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let http = Arc::new(Http::new(&config.discord_bot_token));
    let platform: Arc<dyn ChatPlatform> = Arc::new(DiscordPlatform::new(http, &config));

    // Recovers pending scheduled actions, then keeps reconciling
    // periodically in the background.
    let scheduler = ActionScheduler::new(db.clone(), platform.clone());
    scheduler.start().await?;

    let router = InteractionRouter::new();

    bot::start::start_bot(&config, db, platform, scheduler, router).await
}
