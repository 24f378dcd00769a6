//! Dispatch and motion control for a single simulated passenger elevator.
//!
//! `building` holds the model and the dispatch policy, `controller` runs it
//! as an actor with real timers.

pub mod building;
pub mod config;
pub mod controller;
pub mod shared;

pub use building::Building;
pub use config::Config;
pub use controller::Controller;
pub use shared::{ButtonId, Direction, LiftError, Notification};
