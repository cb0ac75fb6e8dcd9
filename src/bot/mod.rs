//! Bot driver: tick loop and move dispatch

pub mod dispatch;
pub mod tick;

pub use dispatch::dispatch;
pub use tick::{seeded_rng, Bot, TickReport};
