/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    Stationary,
    Up,
    Down,
}

impl MoveState {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            MoveState::Up => Some(Direction::Up),
            MoveState::Down => Some(Direction::Down),
            MoveState::Stationary => None,
        }
    }
}

impl From<Direction> for MoveState {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveState::Up,
            Direction::Down => MoveState::Down,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorStatus {
    Open,
    Closed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    On,
    Off,
}

/// Addresses one physical button in the building.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ButtonId {
    /// Call button on a floor console.
    Hall { floor: u8, direction: Direction },
    /// Floor selection button inside the car.
    Cab { floor: u8 },
}

impl ButtonId {
    pub fn floor(&self) -> u8 {
        match *self {
            ButtonId::Hall { floor, .. } => floor,
            ButtonId::Cab { floor } => floor,
        }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonId::Hall { floor, direction } => write!(f, "hall {} {}", floor, direction),
            ButtonId::Cab { floor } => write!(f, "cab {}", floor),
        }
    }
}

/// Conditions surfaced to the host application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Notification {
    ButtonLit(ButtonId),
    ButtonCleared(ButtonId),
    Departed { floor: u8, direction: Direction },
    FloorPassed { floor: u8 },
    ArrivalAlert { floor: u8 },
    DoorsOpened { floor: u8 },
    DoorsClosed { floor: u8 },
    Stuck { floor: u8, direction: Direction },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FloorSnapshot {
    pub number: u8,
    #[serde(rename = "hasUpPassenger")]
    pub has_up_passenger: bool,
    #[serde(rename = "hasDownPassenger")]
    pub has_down_passenger: bool,
    #[serde(rename = "isTargetFloor")]
    pub is_target_floor: bool,
    #[serde(rename = "upLight")]
    pub up_light: Option<ButtonState>,
    #[serde(rename = "downLight")]
    pub down_light: Option<ButtonState>,
    pub doors: DoorStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub floor: u8,
    #[serde(rename = "moveState")]
    pub move_state: MoveState,
    #[serde(rename = "lastMoveState")]
    pub last_move_state: Option<Direction>,
    pub doors: DoorStatus,
    #[serde(rename = "cabLights")]
    pub cab_lights: Vec<ButtonState>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildingSnapshot {
    pub elevator: ElevatorSnapshot,
    pub floors: Vec<FloorSnapshot>,
}

impl BuildingSnapshot {
    pub fn floor(&self, number: u8) -> Option<&FloorSnapshot> {
        self.floors.iter().find(|f| f.number == number)
    }
}
