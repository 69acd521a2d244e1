//! Warden Test Utils
//!
//! Shared testing utilities for the moderation bot. Provides a builder
//! pattern for creating test contexts with in-memory SQLite databases and
//! customizable table schemas, plus entity factories with sensible
//! defaults.
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database
//! tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::ModerationAction;
//!
//! #[tokio::test]
//! async fn test_action_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(ModerationAction)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
