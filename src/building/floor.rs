use crate::building::console::FloorConsole;
use crate::building::doors::{Doors, DoorsId};
use crate::shared::{ButtonId, ButtonState, Direction, FloorSnapshot};

/**
 * A building level.
 *
 * # Fields
 * - `number`:             1-based floor number, fixed at construction.
 * - `has_up_passenger`:   Someone pressed the up call button.
 * - `has_down_passenger`: Someone pressed the down call button.
 * - `is_target_floor`:    Someone in the car selected this floor.
 * - `doors`:              The landing doors, locked with the car doors while it stands here.
 * - `console`:            The call buttons.
 */
#[derive(Debug, Clone)]
pub struct Floor {
    pub number: u8,
    pub has_up_passenger: bool,
    pub has_down_passenger: bool,
    pub is_target_floor: bool,
    pub doors: Doors,
    pub console: FloorConsole,
}

impl Floor {
    pub fn new(number: u8, is_first: bool, is_top: bool) -> Floor {
        Floor {
            number,
            has_up_passenger: false,
            has_down_passenger: false,
            is_target_floor: false,
            doors: Doors::new(DoorsId::Floor(number), false),
            console: FloorConsole::new(number, !is_top, !is_first),
        }
    }

    /// Records the passenger intent behind a console press.
    pub fn notify_console_press(&mut self, direction: Direction) {
        match self.console.notify_press(direction) {
            Direction::Down => self.notify_down_passenger(),
            Direction::Up => self.notify_up_passenger(),
        }
    }

    /// Clears lights and intents serviced by the car arriving in `direction`.
    /// On a floor with a single call button that call is always serviced.
    pub fn notify_elevator_arrival(&mut self, direction: Direction) -> Vec<ButtonId> {
        let lone = self.console.is_terminal();
        let cleared = self.console.notify_elevator_arrival(direction);

        self.is_target_floor = false;
        if direction == Direction::Up || (lone && self.console.button(Direction::Up).is_some()) {
            self.has_up_passenger = false;
        }
        if direction == Direction::Down || (lone && self.console.button(Direction::Down).is_some()) {
            self.has_down_passenger = false;
        }
        cleared
    }

    pub fn notify_down_passenger(&mut self) {
        self.has_down_passenger = true;
    }

    pub fn notify_up_passenger(&mut self) {
        self.has_up_passenger = true;
    }

    pub fn notify_target_floor(&mut self) {
        self.is_target_floor = true;
    }

    pub fn wants_elevator(&self) -> bool {
        self.has_up_passenger || self.has_down_passenger || self.is_target_floor
    }

    pub fn has_passenger(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.has_up_passenger,
            Direction::Down => self.has_down_passenger,
        }
    }

    pub fn snapshot(&self) -> FloorSnapshot {
        FloorSnapshot {
            number: self.number,
            has_up_passenger: self.has_up_passenger,
            has_down_passenger: self.has_down_passenger,
            is_target_floor: self.is_target_floor,
            up_light: self.light(Direction::Up),
            down_light: self.light(Direction::Down),
            doors: self.doors.status(),
        }
    }

    pub fn light(&self, direction: Direction) -> Option<ButtonState> {
        self.console.button(direction).map(|b| b.state())
    }
}
