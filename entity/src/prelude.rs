pub use super::ban_request::Entity as BanRequest;
pub use super::moderation_action::Entity as ModerationAction;
