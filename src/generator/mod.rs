//! Resource schedule generator
//!
//! Produces the seeded resource list a game server hands out over a game.
//! Useful for local servers and for exercising the bot against realistic
//! resource layouts.

pub mod arcfour;
pub mod schedule;

pub use arcfour::Arcfour;
pub use schedule::{generate, GeneratedSchedule, GeneratorConfig, TypeConfig, WeightParam};
