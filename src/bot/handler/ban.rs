use serenity::all::{GuildId, User};

use crate::bot::handler::Handler;
use crate::service::ModerationService;

/// Handles the guild_ban_addition event.
///
/// A ban applied outside the escalation queue resolves any open request
/// for that subject; the queue entry and its backing restriction are
/// cleaned up without re-applying the ban.
pub async fn handle_guild_ban_addition(handler: &Handler, guild_id: GuildId, banned_user: User) {
    if guild_id.get() != handler.guild_id {
        return;
    }

    let service = ModerationService::new(
        &handler.db,
        handler.platform.clone(),
        handler.scheduler.clone(),
        handler.limits,
    );

    if let Err(e) = service.handle_member_banned(banned_user.id.get()).await {
        tracing::error!("Failed to clean up after ban of {}: {:?}", banned_user.id, e);
    }
}
