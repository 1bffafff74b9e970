// Library exports for the Battlesnake bot
// This allows integration tests and other utilities to use the core logic

pub mod bot;
pub mod config;
pub mod cost;
pub mod decision;
pub mod genome;
pub mod grid;
pub mod pathfind;
pub mod reachability;
pub mod strategy;
pub mod types;
