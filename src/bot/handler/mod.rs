use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, GuildId, Interaction, Member, Ready, User};
use serenity::async_trait;
use std::sync::Arc;

use crate::interaction::router::InteractionRouter;
use crate::platform::ChatPlatform;
use crate::scheduler::ActionScheduler;
use crate::service::moderation::RestrictionLimits;

pub mod ban;
pub mod interaction;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub platform: Arc<dyn ChatPlatform>,
    pub scheduler: ActionScheduler,
    pub router: InteractionRouter,
    pub limits: RestrictionLimits,
    pub guild_id: u64,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        platform: Arc<dyn ChatPlatform>,
        scheduler: ActionScheduler,
        router: InteractionRouter,
        limits: RestrictionLimits,
        guild_id: u64,
    ) -> Self {
        Self {
            db,
            platform,
            scheduler,
            router,
            limits,
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member joins the guild
    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, new_member).await;
    }

    /// Called when a user is banned from the guild
    async fn guild_ban_addition(&self, _ctx: Context, guild_id: GuildId, banned_user: User) {
        ban::handle_guild_ban_addition(self, guild_id, banned_user).await;
    }

    /// Called when a component on one of our messages is activated
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(self, ctx, interaction).await;
    }
}
