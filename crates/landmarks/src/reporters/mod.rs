//! Concrete badge reporters

pub mod board;
pub mod channel;

pub use board::{BadgeBoard, TabBadgeReporter};
pub use channel::ChannelReporter;
