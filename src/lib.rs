//! Collector Bot - tick-driven client for a resource-collection game

pub mod api;
pub mod bot;
pub mod core;
pub mod game;
pub mod generator;
