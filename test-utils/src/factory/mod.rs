//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and `create_*`
//! convenience functions for quick default creation, reducing boilerplate
//! in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let request = factory::ban_request::create_ban_request(&db, 42).await?;
//!
//!     // Customize through the builder
//!     let action = factory::moderation_action::ModerationActionFactory::new(&db)
//!         .subject_id("42")
//!         .completed(true)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod ban_request;
pub mod helpers;
pub mod moderation_action;

// Re-export commonly used factory functions for concise usage
pub use ban_request::create_ban_request;
pub use moderation_action::{create_indefinite_mute, create_pending_mute};
