/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::mem;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::button::ButtonOwner;
use crate::building::doors::{self, DoorArena, DoorEvent, Doors, DoorsId};
use crate::building::elevator::Elevator;
use crate::building::floor::Floor;
use crate::config::{self, Config};
use crate::shared::{
    BuildingSnapshot, ButtonId, Direction, LiftError, MoveState, Notification,
};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Work the building hands to its driver after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Car doors opened: call `dwell_elapsed` after the dwell period.
    ScheduleDwell,
    /// Car advanced one floor: call `travel_elapsed` after the travel delay.
    ScheduleTravel,
    Notify(Notification),
}

/**
 * All floors plus the single car, and the dispatch policy between them.
 *
 * The building never sleeps and never spawns. Time-based work is requested
 * through the outbox (`take_actions`) and reported back by the driver via
 * `dwell_elapsed` and `travel_elapsed`.
 *
 * # Fields
 * - `floors`:        Floors 1..=N, index `number - 1`.
 * - `elevator`:      The car.
 * - `park_at_lobby`: Send an idle car back to floor 1.
 * - `outbox`:        Pending actions for the driver.
 */
#[derive(Debug)]
pub struct Building {
    floors: Vec<Floor>,
    elevator: Elevator,
    park_at_lobby: bool,
    outbox: Vec<Action>,
}

impl DoorArena for Building {
    fn doors(&self, id: DoorsId) -> Result<&Doors, LiftError> {
        match id {
            DoorsId::Car => Ok(&self.elevator.doors),
            DoorsId::Floor(n) => Ok(&self.floor(n)?.doors),
        }
    }

    fn doors_mut(&mut self, id: DoorsId) -> Result<&mut Doors, LiftError> {
        match id {
            DoorsId::Car => Ok(&mut self.elevator.doors),
            DoorsId::Floor(n) => Ok(&mut self.floor_mut(n)?.doors),
        }
    }
}

impl Building {
    pub fn new(config: &Config) -> Result<Building, LiftError> {
        config::validate(config)?;
        let n_floors = config.building.n_floors;

        let mut building = Building {
            floors: (1..=n_floors)
                .map(|n| Floor::new(n, n == 1, n == n_floors))
                .collect(),
            elevator: Elevator::new(n_floors),
            park_at_lobby: config.elevator.park_at_lobby,
            outbox: Vec::new(),
        };

        // The car starts parked at the ground floor
        doors::lock_with(&mut building, DoorsId::Car, DoorsId::Floor(1))?;
        Ok(building)
    }

    pub fn with_floor_count(n_floors: u8) -> Result<Building, LiftError> {
        let mut config = Config::default();
        config.building.n_floors = n_floors;
        Building::new(&config)
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, number: u8) -> Result<&Floor, LiftError> {
        usize::from(number)
            .checked_sub(1)
            .and_then(|i| self.floors.get(i))
            .ok_or(LiftError::UnknownFloor { floor: number })
    }

    pub fn floor_mut(&mut self, number: u8) -> Result<&mut Floor, LiftError> {
        usize::from(number)
            .checked_sub(1)
            .and_then(|i| self.floors.get_mut(i))
            .ok_or(LiftError::UnknownFloor { floor: number })
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    pub fn elevator_mut(&mut self) -> &mut Elevator {
        &mut self.elevator
    }

    pub fn top_floor(&self) -> u8 {
        self.floors.len() as u8
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> BuildingSnapshot {
        BuildingSnapshot {
            elevator: self.elevator.snapshot(),
            floors: self.floors.iter().map(|f| f.snapshot()).collect(),
        }
    }

    /***************************************/
    /*            Button presses           */
    /***************************************/

    /// Presses a console or in-car button and routes it to its owner.
    pub fn press(&mut self, button: ButtonId) -> Result<(), LiftError> {
        let owner = match button {
            ButtonId::Hall { floor, direction } => self
                .floor_mut(floor)?
                .console
                .button_mut(direction)
                .ok_or(LiftError::UnknownButton { button })?
                .press(),
            ButtonId::Cab { floor } => self
                .elevator
                .floor_button_mut(floor)
                .ok_or(LiftError::UnknownFloor { floor })?
                .press(),
        };

        let owner = match owner {
            Some(owner) => owner,
            None => {
                debug!("Button {} already lit", button);
                return Ok(());
            }
        };

        info!("Button {} pressed", button);
        self.notify(Notification::ButtonLit(button));

        match owner {
            ButtonOwner::Console { floor, direction } => {
                self.floor_mut(floor)?.notify_console_press(direction)
            }
            ButtonOwner::Car => self.floor_mut(button.floor())?.notify_target_floor(),
        }
        self.notify_press(button)
    }

    /// Dispatch reaction to a fresh press whose intent is already recorded.
    pub fn notify_press(&mut self, button: ButtonId) -> Result<(), LiftError> {
        let floor = button.floor();
        let current = self.elevator.current_floor;

        if current == floor {
            // A moving car is arriving here; the stop decision will pick it up
            if self.elevator.current_move_state == MoveState::Stationary {
                if self.elevator.doors.are_closed() {
                    self.open_car_doors()?;
                }
                self.service_press(button)?;
            }
        } else if self.elevator.can_move() {
            let direction = if floor > current {
                Direction::Up
            } else {
                Direction::Down
            };
            self.move_elevator(direction)?;
        }
        Ok(())
    }

    /***************************************/
    /*               Motion                */
    /***************************************/

    /// Starts a run in `direction`. No-op unless the car can move.
    pub fn move_elevator(&mut self, direction: Direction) -> Result<(), LiftError> {
        if !self.elevator.begin_move(direction) {
            return Ok(());
        }

        let floor = self.elevator.current_floor;
        doors::release(self, DoorsId::Car)?;
        self.notify(Notification::Departed { floor, direction });

        if let Err(e) = self.do_move() {
            self.elevator.current_move_state = MoveState::Stationary;
            doors::lock_with(self, DoorsId::Car, DoorsId::Floor(floor))?;
            return Err(e);
        }
        Ok(())
    }

    /// Advances the car one floor and asks for the travel delay.
    pub fn do_move(&mut self) -> Result<(), LiftError> {
        let direction = match self.elevator.current_move_state.direction() {
            Some(direction) => direction,
            None => return Ok(()),
        };

        let next = self.next_floor(direction, self.elevator.current_floor)?;
        self.elevator.current_floor = next;
        info!("Elevator moving to floor {}", next);
        self.outbox.push(Action::ScheduleTravel);
        Ok(())
    }

    /// The car has covered the distance to `current_floor`: stop, stall or
    /// keep going.
    pub fn travel_elapsed(&mut self) -> Result<(), LiftError> {
        let direction = match self.elevator.current_move_state.direction() {
            Some(direction) => direction,
            None => {
                warn!("Travel finished while the elevator is stationary");
                return Ok(());
            }
        };
        let floor = self.elevator.current_floor;

        if self.should_elevator_stop_at(floor)? {
            self.stop(direction)
        } else if !self.allows_elevator_move(direction) {
            self.notify_stuck(direction)
        } else {
            self.notify(Notification::FloorPassed { floor });
            self.do_move()
        }
    }

    fn stop(&mut self, direction: Direction) -> Result<(), LiftError> {
        let floor = self.elevator.current_floor;
        info!("Elevator stopping at floor {}", floor);
        self.elevator.audible_alert();
        self.notify(Notification::ArrivalAlert { floor });

        let wants_elevator = self.floor(floor)?.wants_elevator();
        let serviced = self.serviced_direction(floor, direction)?;

        self.elevator.end_move();
        doors::lock_with(self, DoorsId::Car, DoorsId::Floor(floor))?;

        let mut cleared = self.floor_mut(floor)?.notify_elevator_arrival(serviced);
        cleared.extend(self.elevator.clear_floor_button(floor));
        for button in cleared {
            self.notify(Notification::ButtonCleared(button));
        }

        if wants_elevator {
            self.open_car_doors()
        } else {
            // Doors stay shut, so no doors-closed event will re-run dispatch
            self.notify_elevator_ready()
        }
    }

    /// The car cannot continue in `direction` from a terminal floor.
    pub fn notify_stuck(&mut self, direction: Direction) -> Result<(), LiftError> {
        let floor = self.elevator.current_floor;
        warn!("Elevator stuck at floor {} going {}", floor, direction);

        self.elevator.end_move();
        doors::lock_with(self, DoorsId::Car, DoorsId::Floor(floor))?;
        self.notify(Notification::Stuck { floor, direction });
        self.notify_elevator_ready()
    }

    /***************************************/
    /*                Doors                */
    /***************************************/

    /// Dwell period over: close the car doors.
    pub fn dwell_elapsed(&mut self) -> Result<(), LiftError> {
        let events = doors::close(self, DoorsId::Car)?;
        self.handle_door_events(events)
    }

    fn open_car_doors(&mut self) -> Result<(), LiftError> {
        let events = doors::open(self, DoorsId::Car)?;
        self.handle_door_events(events)
    }

    fn handle_door_events(&mut self, events: Vec<DoorEvent>) -> Result<(), LiftError> {
        let floor = self.elevator.current_floor;
        for event in events {
            match event {
                DoorEvent::Opened(DoorsId::Car) => {
                    info!("Doors open at floor {}", floor);
                    self.notify(Notification::DoorsOpened { floor });
                }
                DoorEvent::DwellStarted(_) => {
                    debug!("Waiting for passengers to alight");
                    self.outbox.push(Action::ScheduleDwell);
                }
                DoorEvent::Closed(DoorsId::Car) => {
                    info!("Doors closed at floor {}", floor);
                    self.notify(Notification::DoorsClosed { floor });
                    self.notify_elevator_ready()?;
                }
                DoorEvent::Opened(DoorsId::Floor(_)) | DoorEvent::Closed(DoorsId::Floor(_)) => {}
            }
        }
        Ok(())
    }

    /***************************************/
    /*           Dispatch policy           */
    /***************************************/
    pub fn allows_elevator_move(&self, direction: Direction) -> bool {
        let current = self.elevator.current_floor;
        match direction {
            Direction::Up => current != self.top_floor(),
            Direction::Down => current != 1,
        }
    }

    /// The floor adjacent to `current` in `direction`. Fails at a terminal floor.
    pub fn next_floor(&self, direction: Direction, current: u8) -> Result<u8, LiftError> {
        self.floor(current)?;
        let next = match direction {
            Direction::Up if current < self.top_floor() => current + 1,
            Direction::Down if current > 1 => current - 1,
            _ => {
                return Err(LiftError::NoFloorBeyond {
                    floor: current,
                    direction,
                })
            }
        };
        Ok(next)
    }

    pub fn should_elevator_stop_at(&self, number: u8) -> Result<bool, LiftError> {
        let floor = self.floor(number)?;
        let moving = self.elevator.current_move_state;

        let stop = if moving == MoveState::Down && number == 1 {
            true
        } else if !floor.wants_elevator() {
            false
        } else if floor.is_target_floor {
            true
        } else if floor.has_up_passenger && moving == MoveState::Up {
            true
        } else if floor.has_down_passenger && moving == MoveState::Up {
            // Last chance to pick up before the car turns around
            !self.any_floor_wants_beyond(number, Direction::Up)
        } else {
            floor.has_down_passenger && moving == MoveState::Down
        };
        Ok(stop)
    }

    /// Chooses the next run once the car is free, or leaves it idle.
    pub fn notify_elevator_ready(&mut self) -> Result<(), LiftError> {
        let current = self.elevator.current_floor;

        // A call left at the car's own floor is answered before moving off
        if self.elevator.current_move_state == MoveState::Stationary
            && self.elevator.doors.are_closed()
            && self.floor(current)?.wants_elevator()
        {
            return self.serve_current_floor();
        }

        let higher = self.any_floor_wants_beyond(current, Direction::Up);
        let lower = self.any_floor_wants_beyond(current, Direction::Down);

        let direction = match (self.elevator.last_move_state, higher, lower) {
            (Some(Direction::Up), true, _) => Some(Direction::Up),
            (Some(Direction::Up), false, true) => Some(Direction::Down),
            (Some(Direction::Down), _, true) => Some(Direction::Down),
            (Some(Direction::Down), true, false) => Some(Direction::Up),
            (_, true, _) => Some(Direction::Up),
            (_, false, true) => Some(Direction::Down),
            _ if self.park_at_lobby && current > 1 => Some(Direction::Down),
            _ => None,
        };

        match direction {
            Some(direction) => self.move_elevator(direction),
            None => {
                debug!("Not moving elevator because there's nothing to do");
                Ok(())
            }
        }
    }

    /***************************************/
    /*          Private helpers            */
    /***************************************/
    fn notify(&mut self, notification: Notification) {
        self.outbox.push(Action::Notify(notification));
    }

    fn any_floor_wants_beyond(&self, number: u8, direction: Direction) -> bool {
        self.floors.iter().any(|f| {
            let beyond = match direction {
                Direction::Up => f.number > number,
                Direction::Down => f.number < number,
            };
            beyond && f.wants_elevator()
        })
    }

    /// Direction whose calls a stop at `number` services. A car turning
    /// around for a passenger waiting the other way services that direction.
    fn serviced_direction(&self, number: u8, travel: Direction) -> Result<Direction, LiftError> {
        let floor = self.floor(number)?;
        let turning = !floor.has_passenger(travel)
            && floor.has_passenger(travel.opposite())
            && !self.any_floor_wants_beyond(number, travel);
        Ok(if turning { travel.opposite() } else { travel })
    }

    /// Reopens the doors for one request still pending at the car's floor.
    /// Cab targets go first, then calls in the last travel direction. Any
    /// remaining call is picked up when the doors close again.
    fn serve_current_floor(&mut self) -> Result<(), LiftError> {
        let current = self.elevator.current_floor;
        let floor = self.floor(current)?;
        let preferred = self.elevator.last_move_state.unwrap_or(Direction::Up);

        let button = if floor.is_target_floor {
            ButtonId::Cab { floor: current }
        } else if floor.has_passenger(preferred) {
            ButtonId::Hall { floor: current, direction: preferred }
        } else {
            ButtonId::Hall { floor: current, direction: preferred.opposite() }
        };

        info!("Serving pending {} at floor {}", button, current);
        self.open_car_doors()?;
        self.service_press(button)
    }

    /// Clears the light and intent of a press answered on the spot.
    fn service_press(&mut self, button: ButtonId) -> Result<(), LiftError> {
        let cleared = match button {
            ButtonId::Hall { floor, direction } => {
                let floor = self.floor_mut(floor)?;
                match direction {
                    Direction::Up => floor.has_up_passenger = false,
                    Direction::Down => floor.has_down_passenger = false,
                }
                floor
                    .console
                    .button_mut(direction)
                    .map_or(false, |b| b.disable_light())
            }
            ButtonId::Cab { floor } => {
                self.floor_mut(floor)?.is_target_floor = false;
                self.elevator.clear_floor_button(floor).is_some()
            }
        };
        if cleared {
            self.notify(Notification::ButtonCleared(button));
        }
        Ok(())
    }
}
