use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::interaction::router::InteractionRouter;
use crate::platform::ChatPlatform;
use crate::scheduler::ActionScheduler;
use crate::service::moderation::RestrictionLimits;

/// Starts the Discord bot in a blocking manner
///
/// Creates and starts the Discord bot client; call it last in startup
/// since it blocks until the bot shuts down.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection for the bot to use
/// - `platform` - Chat-platform seam shared with the scheduler
/// - `scheduler` - Running action scheduler
/// - `router` - Registry of live interactive sessions
///
/// # Returns
/// - `Ok(())` if the bot starts and runs successfully
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(
    config: &Config,
    db: DatabaseConnection,
    platform: Arc<dyn ChatPlatform>,
    scheduler: ActionScheduler,
    router: InteractionRouter,
) -> Result<(), AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in the
    // Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_MODERATION;

    let handler = Handler::new(
        db,
        platform,
        scheduler,
        router,
        RestrictionLimits::from_config(config),
        config.guild_id,
    );

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
