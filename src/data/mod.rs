//! Database repository layer.
//!
//! Repositories wrap all SeaORM queries for a table and return row counts
//! from conditional mutations so callers can branch on "did that actually
//! apply" instead of pre-checking existence.

pub mod ban_request;
pub mod moderation_action;

pub use ban_request::BanRequestRepository;
pub use moderation_action::ModerationActionRepository;
