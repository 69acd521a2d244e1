use serenity::all::Member;

use crate::bot::handler::Handler;
use crate::service::ModerationService;

/// Handles the guild_member_addition event when a member joins the guild.
///
/// A subject still under a pending restriction or an open ban request is
/// restricted again, so leaving and rejoining does not shed the
/// restriction.
pub async fn handle_guild_member_addition(handler: &Handler, new_member: Member) {
    if new_member.guild_id.get() != handler.guild_id {
        return;
    }

    let subject_id = new_member.user.id.get();

    let service = ModerationService::new(
        &handler.db,
        handler.platform.clone(),
        handler.scheduler.clone(),
        handler.limits,
    );

    if let Err(e) = service.handle_member_join(subject_id).await {
        tracing::error!(
            "Failed to check restrictions for joining member {}: {:?}",
            subject_id,
            e
        );
    }
}
