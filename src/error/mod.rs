//! Application error types.
//!
//! `AppError` aggregates every error the bot can produce. Validation and
//! conflict cases get their own variants so callers can tell a rejected
//! request apart from an infrastructure failure; external collaborator
//! errors wrap through `#[from]` conversions.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;
use crate::platform::PlatformError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity, boxed due to its size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Chat-platform error surfaced through the platform seam.
    #[error(transparent)]
    PlatformErr(#[from] PlatformError),

    /// Requested restriction length is outside the configured bounds.
    ///
    /// Rejected before any durable write.
    #[error("restriction length {given}s is outside the allowed range {min}s..={max}s")]
    InvalidDuration { given: i64, min: i64, max: i64 },

    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// An active ban request already exists for the subject.
    ///
    /// Raised from the store's unique index, not from a pre-check.
    #[error("an active ban request already exists for subject {0}")]
    DuplicateEscalation(u64),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the enum small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
