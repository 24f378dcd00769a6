//! Error type shared by the model, the controller and the host binary.

use thiserror::Error;

use crate::building::DoorsId;
use crate::shared::{ButtonId, Direction};

/// Errors raised when a caller breaks the contract of the model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiftError {
    /// Doors were asked to open without an established pairing.
    #[error("{doors} doors cannot open: not locked with other doors")]
    DoorsNotLocked { doors: DoorsId },

    /// Travel was requested past a terminal floor.
    #[error("no floor beyond floor {floor} going {direction}")]
    NoFloorBeyond { floor: u8, direction: Direction },

    #[error("unknown floor {floor}")]
    UnknownFloor { floor: u8 },

    /// Button does not exist (e.g. up call on the top floor).
    #[error("unknown button: {button}")]
    UnknownButton { button: ButtonId },

    #[error("a building needs at least 2 floors, got {n_floors}")]
    InvalidFloorCount { n_floors: u8 },

    #[error("configuration error: {0}")]
    Config(String),
}
