/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::{Action, Building};
use crate::config::Config;
use crate::controller::timer::Timer;
use crate::shared::{BuildingSnapshot, ButtonId, LiftError, Notification};

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    ButtonPressed(ButtonId),
    DwellElapsed,
    TravelElapsed,
    Terminate,
}

/**
 * Runs the building as a single-threaded actor.
 *
 * The controller is the only owner of the `Building`. Button presses from
 * the host and timer ticks are handled one at a time, so every state change
 * of the car passes through the `can_move` and door-pairing gates in order.
 *
 * # Fields
 * - `building`:        The simulated building.
 * - `dwell_timer`:     Door dwell period, armed when the car doors open.
 * - `travel_timer`:    Per-floor travel delay, armed when the car advances.
 * - `button_rx`:       Receives button presses from the host.
 * - `notification_tx`: Sends notifications (arrival alert, doors, stuck) to the host.
 * - `state_tx`:        Publishes a snapshot after every handled event.
 * - `terminate_rx`:    Stops the event loop.
 */
pub struct Controller {
    building: Building,
    dwell_timer: Timer,
    travel_timer: Timer,

    // Host channels
    button_rx: cbc::Receiver<ButtonId>,
    notification_tx: cbc::Sender<Notification>,
    state_tx: cbc::Sender<BuildingSnapshot>,
    terminate_rx: cbc::Receiver<()>,
}

impl Controller {
    pub fn new(
        config: &Config,
        button_rx: cbc::Receiver<ButtonId>,
        notification_tx: cbc::Sender<Notification>,
        state_tx: cbc::Sender<BuildingSnapshot>,
        terminate_rx: cbc::Receiver<()>,
    ) -> Result<Controller, LiftError> {
        Ok(Controller {
            building: Building::new(config)?,
            dwell_timer: Timer::new("door_dwell", config.elevator.dwell()),
            travel_timer: Timer::new("travel", config.elevator.travel()),
            button_rx,
            notification_tx,
            state_tx,
            terminate_rx,
        })
    }

    pub fn run(mut self) {
        info!(
            "Controller running with {} floors",
            self.building.top_floor()
        );
        self.publish_state();

        // Main loop
        loop {
            match self.wait_for_event() {
                Event::Terminate => {
                    info!("Controller terminated");
                    return;
                }
                event => self.handle_event(event),
            }
        }
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.button_rx) -> button => {
                match button {
                    Ok(button) => Event::ButtonPressed(button),
                    Err(e) => {
                        debug!("Button channel closed: {}", e);
                        Event::Terminate
                    }
                }
            }
            recv(self.dwell_timer.receiver()) -> _ => Event::DwellElapsed,
            recv(self.travel_timer.receiver()) -> _ => Event::TravelElapsed,
            recv(self.terminate_rx) -> _ => Event::Terminate,
        }
    }

    fn handle_event(&mut self, event: Event) {
        let result = match event {
            Event::ButtonPressed(button) => self.building.press(button),
            Event::DwellElapsed => {
                self.dwell_timer.expire();
                self.building.dwell_elapsed()
            }
            Event::TravelElapsed => {
                self.travel_timer.expire();
                self.building.travel_elapsed()
            }
            Event::Terminate => Ok(()),
        };

        if let Err(e) = result {
            error!("Operation aborted: {}", e);
        }

        self.perform_actions();
        self.publish_state();
    }

    fn perform_actions(&mut self) {
        for action in self.building.take_actions() {
            match action {
                Action::ScheduleDwell => self.dwell_timer.start(),
                Action::ScheduleTravel => self.travel_timer.start(),
                Action::Notify(notification) => {
                    debug!("Notification: {:?}", notification);
                    let _ = self.notification_tx.send(notification);
                }
            }
        }
    }

    fn publish_state(&self) {
        let _ = self.state_tx.send(self.building.snapshot());
    }
}
