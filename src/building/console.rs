use log::debug;

use crate::building::button::{Button, ButtonOwner};
use crate::shared::{ButtonId, Direction};

/**
 * The up/down call buttons on one floor.
 *
 * The top floor has no up button and the bottom floor no down button.
 */
#[derive(Debug, Clone)]
pub struct FloorConsole {
    floor: u8,
    up_button: Option<Button>,
    down_button: Option<Button>,
}

impl FloorConsole {
    pub fn new(floor: u8, has_up: bool, has_down: bool) -> FloorConsole {
        let button = |direction| Button::new(ButtonOwner::Console { floor, direction }, floor);
        FloorConsole {
            floor,
            up_button: has_up.then(|| button(Direction::Up)),
            down_button: has_down.then(|| button(Direction::Down)),
        }
    }

    pub fn button(&self, direction: Direction) -> Option<&Button> {
        match direction {
            Direction::Up => self.up_button.as_ref(),
            Direction::Down => self.down_button.as_ref(),
        }
    }

    pub fn button_mut(&mut self, direction: Direction) -> Option<&mut Button> {
        match direction {
            Direction::Up => self.up_button.as_mut(),
            Direction::Down => self.down_button.as_mut(),
        }
    }

    /// Only one call button exists here (top or bottom floor).
    pub fn is_terminal(&self) -> bool {
        self.up_button.is_none() || self.down_button.is_none()
    }

    /// Maps a press to the passenger intent it records: the down button means
    /// a down passenger, anything else an up passenger.
    pub fn notify_press(&self, direction: Direction) -> Direction {
        debug!(
            "Console notified of {} button for floor {} being pressed",
            direction, self.floor
        );
        match self.down_button {
            Some(_) if direction == Direction::Down => Direction::Down,
            _ => Direction::Up,
        }
    }

    /// Clears the light for the serviced direction. A lone button is always
    /// cleared. Returns the buttons whose light went off.
    pub fn notify_elevator_arrival(&mut self, direction: Direction) -> Vec<ButtonId> {
        let lone = self.is_terminal();
        let mut cleared = Vec::new();

        for button in [self.up_button.as_mut(), self.down_button.as_mut()]
            .into_iter()
            .flatten()
        {
            let serviced = match button.id() {
                ButtonId::Hall { direction: d, .. } => d == direction,
                ButtonId::Cab { .. } => false,
            };
            if (lone || serviced) && button.disable_light() {
                cleared.push(button.id());
            }
        }
        cleared
    }
}
