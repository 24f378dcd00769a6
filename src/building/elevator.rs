use log::info;

use crate::building::button::{Button, ButtonOwner};
use crate::building::doors::{Doors, DoorsId};
use crate::shared::{ButtonId, Direction, ElevatorSnapshot, MoveState};

/**
 * The car.
 *
 * State that belongs to the car alone lives here; everything that touches
 * floors (travel, stopping, door coupling) is driven by the `Building`.
 *
 * # Fields
 * - `current_floor`:      Floor number the car is at or last passed.
 * - `current_move_state`: Stationary, or the direction of the run in progress.
 * - `last_move_state`:    Direction of the most recently completed run.
 * - `doors`:              Car doors, passenger-triggered.
 * - `floor_buttons`:      One in-car button per floor, index `floor - 1`.
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    pub current_floor: u8,
    pub current_move_state: MoveState,
    pub last_move_state: Option<Direction>,
    pub doors: Doors,
    floor_buttons: Vec<Button>,
}

impl Elevator {
    pub fn new(n_floors: u8) -> Elevator {
        Elevator {
            current_floor: 1,
            current_move_state: MoveState::Stationary,
            last_move_state: None,
            doors: Doors::new(DoorsId::Car, true),
            floor_buttons: (1..=n_floors)
                .map(|floor| Button::new(ButtonOwner::Car, floor))
                .collect(),
        }
    }

    pub fn can_move(&self) -> bool {
        self.current_move_state == MoveState::Stationary && self.doors.are_closed()
    }

    /// Commits the car to a run. Returns false (and changes nothing) unless
    /// the car is free to move.
    pub fn begin_move(&mut self, direction: Direction) -> bool {
        if !self.can_move() {
            return false;
        }
        info!("Elevator starting {} from floor {}", direction, self.current_floor);
        self.current_move_state = direction.into();
        true
    }

    /// Ends the current run, remembering its direction for dispatch.
    pub fn end_move(&mut self) {
        if let Some(direction) = self.current_move_state.direction() {
            self.last_move_state = Some(direction);
        }
        self.current_move_state = MoveState::Stationary;
    }

    pub fn audible_alert(&self) {
        info!("Ding!!! arrival at floor {}", self.current_floor);
    }

    pub fn floor_button(&self, floor: u8) -> Option<&Button> {
        self.floor_buttons.get(usize::from(floor).checked_sub(1)?)
    }

    pub fn floor_button_mut(&mut self, floor: u8) -> Option<&mut Button> {
        self.floor_buttons.get_mut(usize::from(floor).checked_sub(1)?)
    }

    /// Turns off the in-car light for `floor`, returning it if it was lit.
    pub fn clear_floor_button(&mut self, floor: u8) -> Option<ButtonId> {
        let button = self.floor_button_mut(floor)?;
        button.disable_light().then(|| button.id())
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            floor: self.current_floor,
            move_state: self.current_move_state,
            last_move_state: self.last_move_state,
            doors: self.doors.status(),
            cab_lights: self.floor_buttons.iter().map(|b| b.state()).collect(),
        }
    }
}
