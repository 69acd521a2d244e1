use serenity::all::{
    ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditMessage, GuildId,
    MessageId, RoleId, UserId,
};
use serenity::async_trait;
use serenity::http::{Http, HttpError, StatusCode};
use std::sync::Arc;

use crate::config::Config;
use crate::platform::{
    ButtonStyle, ChannelRef, ChatPlatform, Component, MessageRef, PlatformError, RenderedPage,
};

/// Discord implementation of the chat-platform seam.
///
/// Restrictions are modeled as the configured muted role; bans go through
/// the guild ban endpoint without deleting message history.
pub struct DiscordPlatform {
    http: Arc<Http>,
    guild_id: GuildId,
    muted_role_id: RoleId,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, config: &Config) -> Self {
        Self {
            http,
            guild_id: GuildId::new(config.guild_id),
            muted_role_id: RoleId::new(config.muted_role_id),
        }
    }
}

/// Maps a Serenity error onto the platform failure surface.
///
/// A 404 from the HTTP API means the target (message, member, channel) is
/// gone; everything else is reported as the platform being unavailable.
fn map_platform_err(err: serenity::Error) -> PlatformError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(ref response)) = err {
        if response.status_code == StatusCode::NOT_FOUND {
            return PlatformError::NotFound(err.to_string());
        }
    }
    PlatformError::Unavailable(err.to_string())
}

fn build_embed(content: &RenderedPage) -> CreateEmbed {
    let mut embed = CreateEmbed::new().description(content.body.clone());
    if let Some(title) = &content.title {
        embed = embed.title(title);
    }
    if let Some(footer) = &content.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

fn build_action_rows(components: &[Component]) -> Vec<CreateActionRow> {
    let mut rows = Vec::new();
    let mut buttons = Vec::new();

    for component in components {
        match component {
            Component::Button {
                id,
                label,
                style,
                disabled,
            } => {
                let style = match style {
                    ButtonStyle::Primary => serenity::all::ButtonStyle::Primary,
                    ButtonStyle::Secondary => serenity::all::ButtonStyle::Secondary,
                    ButtonStyle::Danger => serenity::all::ButtonStyle::Danger,
                };
                buttons.push(
                    CreateButton::new(id)
                        .label(label)
                        .style(style)
                        .disabled(*disabled),
                );
            }
            Component::Select {
                id,
                placeholder,
                options,
                disabled,
            } => {
                let kind = CreateSelectMenuKind::String {
                    options: options
                        .iter()
                        .map(|option| CreateSelectMenuOption::new(option, option))
                        .collect(),
                };
                rows.push(CreateActionRow::SelectMenu(
                    CreateSelectMenu::new(id, kind)
                        .placeholder(placeholder)
                        .disabled(*disabled),
                ));
            }
        }
    }

    if !buttons.is_empty() {
        rows.insert(0, CreateActionRow::Buttons(buttons));
    }

    rows
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn send_message(
        &self,
        channel: ChannelRef,
        content: &RenderedPage,
        components: &[Component],
    ) -> Result<MessageRef, PlatformError> {
        let channel_id = ChannelId::new(channel.0);
        let builder = CreateMessage::new()
            .embed(build_embed(content))
            .components(build_action_rows(components));

        let message = channel_id
            .send_message(&self.http, builder)
            .await
            .map_err(map_platform_err)?;

        Ok(MessageRef {
            channel_id: channel.0,
            message_id: message.id.get(),
        })
    }

    async fn edit_message(
        &self,
        message: MessageRef,
        content: &RenderedPage,
        components: &[Component],
    ) -> Result<(), PlatformError> {
        let builder = EditMessage::new()
            .embed(build_embed(content))
            .components(build_action_rows(components));

        ChannelId::new(message.channel_id)
            .edit_message(&self.http, MessageId::new(message.message_id), builder)
            .await
            .map_err(map_platform_err)?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError> {
        ChannelId::new(message.channel_id)
            .delete_message(&self.http, MessageId::new(message.message_id))
            .await
            .map_err(map_platform_err)
    }

    async fn add_restriction(&self, subject_id: u64) -> Result<(), PlatformError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(subject_id),
                self.muted_role_id,
                Some("restriction applied"),
            )
            .await
            .map_err(map_platform_err)
    }

    async fn remove_restriction(&self, subject_id: u64) -> Result<(), PlatformError> {
        self.http
            .remove_member_role(
                self.guild_id,
                UserId::new(subject_id),
                self.muted_role_id,
                Some("restriction lifted"),
            )
            .await
            .map_err(map_platform_err)
    }

    async fn ban(&self, subject_id: u64, reason: Option<&str>) -> Result<(), PlatformError> {
        self.http
            .ban_user(self.guild_id, UserId::new(subject_id), 0, reason)
            .await
            .map_err(map_platform_err)
    }
}
