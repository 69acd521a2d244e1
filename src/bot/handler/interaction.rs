use serenity::all::{Context, CreateInteractionResponse, Interaction};

use crate::bot::handler::Handler;

/// Handles component interactions by acknowledging the press and routing
/// it to the session bound to the message.
///
/// The acknowledgement keeps Discord from flagging the press as failed;
/// the session itself applies any edit through the platform seam.
pub async fn handle_interaction_create(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Component(component) = interaction else {
        return;
    };

    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::warn!("Failed to acknowledge component interaction: {:?}", e);
    }

    let delivered = handler
        .router
        .dispatch(
            component.message.id.get(),
            component.user.id.get(),
            component.data.custom_id.clone(),
        )
        .await;

    if !delivered {
        tracing::debug!(
            "No live session for component press on message {}",
            component.message.id
        );
    }
}
