//! Chat-platform seam.
//!
//! The rest of the crate talks to the chat platform exclusively through the
//! `ChatPlatform` trait: sending, editing and deleting rendered messages,
//! and applying moderation effects to a subject. `DiscordPlatform` is the
//! production implementation over Serenity's HTTP client; tests substitute
//! a call-recording fake.

pub mod discord;

use serenity::async_trait;
use thiserror::Error;

/// Channel a message is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRef(pub u64);

/// Identity of one sent message, used to edit or delete it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Platform-neutral rendered content for one message or page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: Option<String>,
    pub body: String,
    pub footer: Option<String>,
}

impl RenderedPage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            footer: None,
        }
    }

    pub fn titled(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Visual style for a button control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
}

/// Interactive control attached to a message.
///
/// Sessions dispatch on the component id; the variant only affects how the
/// platform renders the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Button {
        id: String,
        label: String,
        style: ButtonStyle,
        disabled: bool,
    },
    Select {
        id: String,
        placeholder: String,
        options: Vec<String>,
        disabled: bool,
    },
}

impl Component {
    pub fn button(id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Component::Button {
            id: id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Component::Button { id, .. } => id,
            Component::Select { id, .. } => id,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Component::Button { disabled, .. } => *disabled,
            Component::Select { disabled, .. } => *disabled,
        }
    }

    pub fn set_disabled(&mut self, value: bool) {
        match self {
            Component::Button { disabled, .. } => *disabled = value,
            Component::Select { disabled, .. } => *disabled = value,
        }
    }
}

/// Failure surface of the chat platform.
///
/// Everything the platform can do wrong collapses into these two cases:
/// the target no longer exists, or the platform could not be reached /
/// refused the call.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("platform unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// External chat platform as consumed by sessions, the scheduler, and the
/// moderation workflow.
///
/// Moderation effects (`add_restriction`, `remove_restriction`, `ban`) must
/// be idempotent on the platform side: applying an already-applied
/// restriction or removing an already-removed one is a no-op, not an error.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_message(
        &self,
        channel: ChannelRef,
        content: &RenderedPage,
        components: &[Component],
    ) -> Result<MessageRef, PlatformError>;

    async fn edit_message(
        &self,
        message: MessageRef,
        content: &RenderedPage,
        components: &[Component],
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, message: MessageRef) -> Result<(), PlatformError>;

    /// Applies the configured restriction to a subject.
    async fn add_restriction(&self, subject_id: u64) -> Result<(), PlatformError>;

    /// Removes the configured restriction from a subject.
    async fn remove_restriction(&self, subject_id: u64) -> Result<(), PlatformError>;

    /// Permanently bans a subject.
    async fn ban(&self, subject_id: u64, reason: Option<&str>) -> Result<(), PlatformError>;
}
