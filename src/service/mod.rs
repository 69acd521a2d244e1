//! Business logic layer.

pub mod moderation;

pub use moderation::ModerationService;

#[cfg(test)]
mod test;
