//! Discord bot integration.
//!
//! Event ingress for the moderation core: component presses are
//! acknowledged and routed to their interactive sessions, membership
//! changes feed the moderation workflow's re-apply and cleanup paths.
//! The bot runs on the same database connection and platform seam as the
//! scheduler, so everything it triggers flows through the same durable
//! state.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability events
//! - `GUILD_MEMBERS` - Member join events (privileged intent)
//! - `GUILD_MODERATION` - Ban events
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly
//! enabled in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
