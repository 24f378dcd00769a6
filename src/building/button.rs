use crate::shared::{ButtonId, ButtonState, Direction};

/// Who is told when a button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOwner {
    Console { floor: u8, direction: Direction },
    Car,
}

/// An illuminated call button bound to one owner and one target floor.
#[derive(Debug, Clone)]
pub struct Button {
    state: ButtonState,
    owner: ButtonOwner,
    floor: u8,
}

impl Button {
    pub fn new(owner: ButtonOwner, floor: u8) -> Button {
        Button {
            state: ButtonState::Off,
            owner,
            floor,
        }
    }

    pub fn id(&self) -> ButtonId {
        match self.owner {
            ButtonOwner::Console { floor, direction } => ButtonId::Hall { floor, direction },
            ButtonOwner::Car => ButtonId::Cab { floor: self.floor },
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn is_lit(&self) -> bool {
        self.state == ButtonState::On
    }

    /// Lights the button and returns the owner to notify.
    /// Returns `None` if the button was already lit.
    pub fn press(&mut self) -> Option<ButtonOwner> {
        if self.is_lit() {
            return None;
        }
        self.state = ButtonState::On;
        Some(self.owner)
    }

    /// Turns the light off. Returns whether it was on.
    pub fn disable_light(&mut self) -> bool {
        let was_lit = self.is_lit();
        self.state = ButtonState::Off;
        was_lit
    }
}
