/*
 * Unit tests for the building dispatch policy
 *
 * The unit tests follows the Arrange, Act, Assert pattern. Timers are
 * simulated by calling `travel_elapsed` / `dwell_elapsed` whenever the
 * building asks for them.
 *
 * Tests:
 * - test_building_init
 * - test_building_rejects_single_floor
 * - test_next_floor_terminal
 * - test_allows_elevator_move
 * - test_stop_for_last_down_passenger
 * - test_stop_rules
 * - test_ready_continues_toward_remaining_request
 * - test_ready_idle_at_lobby
 * - test_ready_parks_at_lobby
 * - test_ready_without_lobby_parking
 * - test_ready_serves_opposite_call_at_same_floor
 * - test_press_at_current_floor_opens_doors
 * - test_press_at_current_floor_with_doors_open
 * - test_cab_press_travels_and_stops
 * - test_end_to_end_scenario
 * - test_press_while_moving_is_picked_up
 * - test_press_on_lit_button_is_noop
 * - test_unknown_buttons
 * - test_stuck_at_top_floor
 * - test_turnaround_services_down_call
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod building_tests {
    use crate::building::{Action, Building, DoorArena, DoorsId};
    use crate::config::Config;
    use crate::shared::ButtonState::{Off, On};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::{ButtonId, Direction, LiftError, MoveState, Notification};

    /// Outcome of running the building until the car needs no more travel.
    struct Drive {
        notifications: Vec<Notification>,
        dwell_scheduled: bool,
    }

    fn hall(floor: u8, direction: Direction) -> ButtonId {
        ButtonId::Hall { floor, direction }
    }

    fn cab(floor: u8) -> ButtonId {
        ButtonId::Cab { floor }
    }

    fn assert_motion_door_exclusion(building: &Building) {
        let car = building.elevator();
        assert!(
            car.current_move_state == MoveState::Stationary || car.doors.are_closed(),
            "car moving with doors open at floor {}",
            car.current_floor
        );
    }

    fn drive(building: &mut Building) -> Drive {
        let mut drive = Drive {
            notifications: Vec::new(),
            dwell_scheduled: false,
        };
        loop {
            assert_motion_door_exclusion(building);
            let mut travel = false;
            for action in building.take_actions() {
                match action {
                    Action::ScheduleTravel => travel = true,
                    Action::ScheduleDwell => drive.dwell_scheduled = true,
                    Action::Notify(n) => drive.notifications.push(n),
                }
            }
            if !travel {
                return drive;
            }
            building.travel_elapsed().unwrap();
        }
    }

    fn set_floor(building: &mut Building, floor: u8, move_state: MoveState) {
        let car = building.elevator_mut();
        car.current_floor = floor;
        car.current_move_state = move_state;
    }

    #[test]
    fn test_building_init() {
        // Act
        let building = Building::with_floor_count(10).unwrap();

        // Assert
        let numbers: Vec<u8> = building.floors().iter().map(|f| f.number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u8>>());
        assert_eq!(building.elevator().current_floor, 1);
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert!(building.elevator().can_move());
        assert_eq!(building.elevator().doors.paired(), Some(DoorsId::Floor(1)));
        assert_eq!(
            building.doors(DoorsId::Floor(1)).unwrap().paired(),
            Some(DoorsId::Car)
        );
    }

    #[test]
    fn test_building_rejects_single_floor() {
        assert_eq!(
            Building::with_floor_count(1).unwrap_err(),
            LiftError::InvalidFloorCount { n_floors: 1 }
        );
    }

    #[test]
    fn test_next_floor_terminal() {
        let building = Building::with_floor_count(10).unwrap();

        assert_eq!(
            building.next_floor(Up, 10),
            Err(LiftError::NoFloorBeyond { floor: 10, direction: Up })
        );
        assert_eq!(
            building.next_floor(Down, 1),
            Err(LiftError::NoFloorBeyond { floor: 1, direction: Down })
        );
        assert_eq!(building.next_floor(Up, 4), Ok(5));
        assert_eq!(building.next_floor(Down, 4), Ok(3));
        assert_eq!(building.next_floor(Up, 11), Err(LiftError::UnknownFloor { floor: 11 }));
    }

    #[test]
    fn test_allows_elevator_move() {
        let mut building = Building::with_floor_count(5).unwrap();

        assert!(building.allows_elevator_move(Up));
        assert!(!building.allows_elevator_move(Down));

        set_floor(&mut building, 5, MoveState::Stationary);
        assert!(!building.allows_elevator_move(Up));
        assert!(building.allows_elevator_move(Down));
    }

    #[test]
    fn test_stop_for_last_down_passenger() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.floor_mut(3).unwrap().notify_down_passenger();
        building.floor_mut(5).unwrap().notify_down_passenger();
        set_floor(&mut building, 2, MoveState::Up);

        // Act & Assert
        assert_eq!(building.should_elevator_stop_at(5), Ok(true));
        assert_eq!(building.should_elevator_stop_at(3), Ok(false));
    }

    #[test]
    fn test_stop_rules() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.floor_mut(4).unwrap().notify_target_floor();
        building.floor_mut(6).unwrap().notify_up_passenger();
        building.floor_mut(7).unwrap().notify_down_passenger();

        // Moving up
        set_floor(&mut building, 3, MoveState::Up);
        assert_eq!(building.should_elevator_stop_at(2), Ok(false));
        assert_eq!(building.should_elevator_stop_at(4), Ok(true));
        assert_eq!(building.should_elevator_stop_at(6), Ok(true));
        assert_eq!(building.should_elevator_stop_at(1), Ok(false));

        // Moving down
        set_floor(&mut building, 8, MoveState::Down);
        assert_eq!(building.should_elevator_stop_at(7), Ok(true));
        assert_eq!(building.should_elevator_stop_at(6), Ok(false));
        assert_eq!(building.should_elevator_stop_at(4), Ok(true));
        assert_eq!(building.should_elevator_stop_at(1), Ok(true));
    }

    #[test]
    fn test_ready_continues_toward_remaining_request() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.floor_mut(2).unwrap().notify_up_passenger();
        set_floor(&mut building, 6, MoveState::Stationary);
        building.elevator_mut().last_move_state = Some(Up);

        // Act
        building.notify_elevator_ready().unwrap();

        // Assert
        assert_eq!(building.elevator().current_move_state, MoveState::Down);
        assert_eq!(building.elevator().current_floor, 5);
        assert!(building.take_actions().contains(&Action::ScheduleTravel));
    }

    #[test]
    fn test_ready_idle_at_lobby() {
        let mut building = Building::with_floor_count(10).unwrap();

        building.notify_elevator_ready().unwrap();

        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert!(building.take_actions().is_empty());
    }

    #[test]
    fn test_ready_parks_at_lobby() {
        // Arrange
        let mut building = Building::with_floor_count(6).unwrap();
        set_floor(&mut building, 4, MoveState::Stationary);
        building.elevator_mut().last_move_state = Some(Up);

        // Act
        building.notify_elevator_ready().unwrap();
        let drive = drive(&mut building);

        // Assert
        assert_eq!(building.elevator().current_floor, 1);
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert!(building.elevator().doors.are_closed());
        assert!(!drive.dwell_scheduled);
        assert!(drive.notifications.contains(&Notification::ArrivalAlert { floor: 1 }));
    }

    #[test]
    fn test_ready_without_lobby_parking() {
        // Arrange
        let mut config = Config::default();
        config.elevator.park_at_lobby = false;
        let mut building = Building::new(&config).unwrap();
        set_floor(&mut building, 4, MoveState::Stationary);

        // Act
        building.notify_elevator_ready().unwrap();

        // Assert
        assert_eq!(building.elevator().current_floor, 4);
        assert!(building.take_actions().is_empty());
    }

    #[test]
    fn test_ready_serves_opposite_call_at_same_floor() {
        // Purpose: Up and down calls on one floor are both answered even when
        // the idle car stays put

        // Arrange
        let mut config = Config::default();
        config.elevator.park_at_lobby = false;
        let mut building = Building::new(&config).unwrap();
        building.press(hall(5, Up)).unwrap();
        building.press(hall(5, Down)).unwrap();

        // Act: the car stops going up and serves the up call first
        drive(&mut building);
        assert_eq!(building.elevator().current_floor, 5);
        assert_eq!(building.floor(5).unwrap().light(Up), Some(Off));
        assert_eq!(building.floor(5).unwrap().light(Down), Some(On));

        // Act: doors close with the down call still waiting
        building.dwell_elapsed().unwrap();
        let reopened = drive(&mut building);

        // Assert
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert!(building.elevator().doors.are_open());
        assert!(reopened.dwell_scheduled);
        assert!(reopened
            .notifications
            .contains(&Notification::ButtonCleared(hall(5, Down))));
        assert_eq!(building.floor(5).unwrap().light(Down), Some(Off));
        assert!(!building.floor(5).unwrap().wants_elevator());

        // Nothing left: the car closes up and idles at floor 5
        building.dwell_elapsed().unwrap();
        drive(&mut building);
        assert_eq!(building.elevator().current_floor, 5);
        assert!(building.elevator().doors.are_closed());
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
    }

    #[test]
    fn test_press_at_current_floor_opens_doors() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();

        // Act
        building.press(hall(1, Up)).unwrap();
        let actions = building.take_actions();

        // Assert
        assert!(building.elevator().doors.are_open());
        assert!(building.floor(1).unwrap().doors.are_open());
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert!(!building.elevator().can_move());
        assert!(actions.contains(&Action::ScheduleDwell));
        assert!(actions.contains(&Action::Notify(Notification::DoorsOpened { floor: 1 })));
        assert_eq!(building.floor(1).unwrap().light(Up), Some(Off));
        assert!(!building.floor(1).unwrap().wants_elevator());
    }

    #[test]
    fn test_press_at_current_floor_with_doors_open() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.press(hall(1, Up)).unwrap();
        building.take_actions();

        // Act
        building.press(cab(1)).unwrap();
        let actions = building.take_actions();

        // Assert: serviced at once, dwell left running
        assert_eq!(
            actions,
            vec![
                Action::Notify(Notification::ButtonLit(cab(1))),
                Action::Notify(Notification::ButtonCleared(cab(1))),
            ]
        );
        assert!(building.elevator().doors.are_open());
        assert_eq!(building.elevator().floor_button(1).unwrap().state(), Off);
        assert!(!building.floor(1).unwrap().is_target_floor);
    }

    #[test]
    fn test_cab_press_travels_and_stops() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();

        // Act
        building.press(cab(4)).unwrap();
        let drive = drive(&mut building);

        // Assert
        let car = building.elevator();
        assert_eq!(car.current_floor, 4);
        assert_eq!(car.current_move_state, MoveState::Stationary);
        assert_eq!(car.last_move_state, Some(Up));
        assert!(car.doors.are_open());
        assert_eq!(car.floor_button(4).unwrap().state(), Off);
        assert!(building.floor(4).unwrap().doors.are_open());
        assert!(building.floor(1).unwrap().doors.are_closed());
        assert!(!building.floor(4).unwrap().is_target_floor);
        assert!(drive.dwell_scheduled);
        assert_eq!(
            drive.notifications,
            vec![
                Notification::ButtonLit(cab(4)),
                Notification::Departed { floor: 1, direction: Up },
                Notification::FloorPassed { floor: 2 },
                Notification::FloorPassed { floor: 3 },
                Notification::ArrivalAlert { floor: 4 },
                Notification::ButtonCleared(cab(4)),
                Notification::DoorsOpened { floor: 4 },
            ]
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();

        // Act: hall call at the floor the car is parked at
        building.press(hall(1, Up)).unwrap();
        assert!(building.elevator().doors.are_open());
        assert_eq!(building.elevator().current_floor, 1);
        assert!(drive(&mut building).dwell_scheduled);
        building.dwell_elapsed().unwrap();
        assert!(drive(&mut building).notifications.contains(&Notification::DoorsClosed { floor: 1 }));
        assert_eq!(building.elevator().current_floor, 1);

        // Act: passenger selects floor 4
        building.press(cab(4)).unwrap();
        drive(&mut building);
        assert_eq!(building.elevator().current_floor, 4);
        assert!(building.elevator().doors.are_open());
        assert_eq!(building.elevator().floor_button(4).unwrap().state(), Off);

        // Act: down call on floor 2 while the doors are open
        building.press(hall(2, Down)).unwrap();
        assert_eq!(building.elevator().current_move_state, MoveState::Stationary);
        assert_eq!(building.floor(2).unwrap().light(Down), Some(On));
        drive(&mut building);
        building.dwell_elapsed().unwrap();
        assert_eq!(building.elevator().current_move_state, MoveState::Down);
        let drive = drive(&mut building);

        // Assert
        assert_eq!(building.elevator().current_floor, 2);
        assert!(building.elevator().doors.are_open());
        assert_eq!(building.floor(2).unwrap().light(Down), Some(Off));
        assert!(!building.floor(2).unwrap().wants_elevator());
        assert!(drive.notifications.contains(&Notification::FloorPassed { floor: 3 }));
    }

    #[test]
    fn test_press_while_moving_is_picked_up() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.press(cab(6)).unwrap();
        building.take_actions();
        building.travel_elapsed().unwrap(); // passes floor 2, now heading to 3

        // Act
        building.press(hall(4, Up)).unwrap();
        assert_eq!(building.elevator().current_move_state, MoveState::Up);
        drive(&mut building);

        // Assert
        assert_eq!(building.elevator().current_floor, 4);
        assert!(building.elevator().doors.are_open());
        assert!(building.floor(6).unwrap().is_target_floor);

        // Doors close, car carries on up to the cab target
        building.dwell_elapsed().unwrap();
        drive(&mut building);
        assert_eq!(building.elevator().current_floor, 6);
        assert!(!building.floor(6).unwrap().is_target_floor);
    }

    #[test]
    fn test_press_on_lit_button_is_noop() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();
        building.press(hall(5, Down)).unwrap();
        building.take_actions();
        let before = building.snapshot();

        // Act
        building.press(hall(5, Down)).unwrap();

        // Assert
        assert!(building.take_actions().is_empty());
        assert_eq!(building.snapshot(), before);
    }

    #[test]
    fn test_unknown_buttons() {
        let mut building = Building::with_floor_count(10).unwrap();

        assert_eq!(
            building.press(hall(10, Up)),
            Err(LiftError::UnknownButton { button: hall(10, Up) })
        );
        assert_eq!(
            building.press(hall(1, Down)),
            Err(LiftError::UnknownButton { button: hall(1, Down) })
        );
        assert_eq!(building.press(cab(11)), Err(LiftError::UnknownFloor { floor: 11 }));
        assert_eq!(building.press(cab(0)), Err(LiftError::UnknownFloor { floor: 0 }));
    }

    #[test]
    fn test_stuck_at_top_floor() {
        // Arrange
        let mut building = Building::with_floor_count(5).unwrap();
        set_floor(&mut building, 5, MoveState::Up);

        // Act
        building.travel_elapsed().unwrap();
        let actions = building.take_actions();

        // Assert
        assert!(actions.contains(&Action::Notify(Notification::Stuck { floor: 5, direction: Up })));
        assert_eq!(building.elevator().last_move_state, Some(Up));
        assert!(building.elevator().doors.are_closed());

        // Dispatch sends the idle car back toward the lobby
        assert_eq!(building.elevator().current_move_state, MoveState::Down);
        assert!(actions.contains(&Action::Notify(Notification::Departed { floor: 5, direction: Down })));
        assert!(actions.contains(&Action::ScheduleTravel));
    }

    #[test]
    fn test_turnaround_services_down_call() {
        // Arrange
        let mut building = Building::with_floor_count(10).unwrap();

        // Act
        building.press(hall(7, Down)).unwrap();
        let drive = drive(&mut building);

        // Assert
        assert_eq!(building.elevator().current_floor, 7);
        assert!(building.elevator().doors.are_open());
        assert_eq!(building.floor(7).unwrap().light(Down), Some(Off));
        assert!(!building.floor(7).unwrap().wants_elevator());
        assert!(drive
            .notifications
            .contains(&Notification::ButtonCleared(hall(7, Down))));
    }
}
