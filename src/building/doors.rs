/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{DoorStatus, LiftError};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Identifies a door set by its owner: the car or one floor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorsId {
    Car,
    Floor(u8),
}

impl fmt::Display for DoorsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorsId::Car => write!(f, "elevator"),
            DoorsId::Floor(n) => write!(f, "floor {}", n),
        }
    }
}

/// Observable side effects of opening or closing a coupled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    Opened(DoorsId),
    /// The passenger-triggered side opened; its dwell timer must start.
    DwellStarted(DoorsId),
    /// Owner of these doors must be told they closed.
    Closed(DoorsId),
}

/**
 * A set of doors, either in the car or on a floor.
 *
 * Doors only open while locked with a second set, and opening or closing
 * one side carries the other with it.
 *
 * # Fields
 * - `id`:                  Owner of the doors, used for upward notification.
 * - `status`:              Open or closed.
 * - `paired`:              The doors these are locked with, if any.
 * - `passenger_triggered`: Opening starts a dwell timer (car doors only).
 */
#[derive(Debug, Clone)]
pub struct Doors {
    id: DoorsId,
    status: DoorStatus,
    paired: Option<DoorsId>,
    passenger_triggered: bool,
}

impl Doors {
    pub fn new(id: DoorsId, passenger_triggered: bool) -> Doors {
        Doors {
            id,
            status: DoorStatus::Closed,
            paired: None,
            passenger_triggered,
        }
    }

    pub fn id(&self) -> DoorsId {
        self.id
    }

    pub fn status(&self) -> DoorStatus {
        self.status
    }

    pub fn paired(&self) -> Option<DoorsId> {
        self.paired
    }

    pub fn are_open(&self) -> bool {
        self.status == DoorStatus::Open
    }

    pub fn are_closed(&self) -> bool {
        self.status == DoorStatus::Closed
    }
}

/// Lookup of door sets by id, implemented by whoever holds them.
pub trait DoorArena {
    fn doors(&self, id: DoorsId) -> Result<&Doors, LiftError>;
    fn doors_mut(&mut self, id: DoorsId) -> Result<&mut Doors, LiftError>;
}

/***************************************/
/*             Public API              */
/***************************************/

/// Pairs `a` and `b` symmetrically, dropping any pairing either had before.
pub fn lock_with<A: DoorArena + ?Sized>(
    arena: &mut A,
    a: DoorsId,
    b: DoorsId,
) -> Result<(), LiftError> {
    release(arena, a)?;
    release(arena, b)?;
    debug!("{} doors locking with {} doors", a, b);
    arena.doors_mut(a)?.paired = Some(b);
    arena.doors_mut(b)?.paired = Some(a);
    Ok(())
}

/// Drops the pairing of `id` and of whatever it was locked with.
pub fn release<A: DoorArena + ?Sized>(arena: &mut A, id: DoorsId) -> Result<(), LiftError> {
    if let Some(other) = arena.doors_mut(id)?.paired.take() {
        let other = arena.doors_mut(other)?;
        if other.paired == Some(id) {
            other.paired = None;
        }
    }
    Ok(())
}

/// Opens `id` and, through the pairing, the doors it is locked with.
pub fn open<A: DoorArena + ?Sized>(
    arena: &mut A,
    id: DoorsId,
) -> Result<Vec<DoorEvent>, LiftError> {
    let mut events = Vec::new();
    open_into(arena, id, &mut events)?;
    Ok(events)
}

/// Closes `id` and the doors it is locked with. Every closed side is
/// reported, including doors that were already closed.
pub fn close<A: DoorArena + ?Sized>(
    arena: &mut A,
    id: DoorsId,
) -> Result<Vec<DoorEvent>, LiftError> {
    let mut events = Vec::new();
    close_into(arena, id, &mut events)?;
    Ok(events)
}

/***************************************/
/*          Private helpers            */
/***************************************/
fn open_into<A: DoorArena + ?Sized>(
    arena: &mut A,
    id: DoorsId,
    events: &mut Vec<DoorEvent>,
) -> Result<(), LiftError> {
    let doors = arena.doors_mut(id)?;
    let paired = doors.paired.ok_or(LiftError::DoorsNotLocked { doors: id })?;

    // The other side must be able to open before we commit this one
    if arena.doors(paired)?.paired.is_none() {
        return Err(LiftError::DoorsNotLocked { doors: paired });
    }

    let doors = arena.doors_mut(id)?;
    doors.status = DoorStatus::Open;
    let passenger_triggered = doors.passenger_triggered;
    debug!("{} doors opening", id);
    events.push(DoorEvent::Opened(id));

    if !arena.doors(paired)?.are_open() {
        open_into(arena, paired, events)?;
    }

    if passenger_triggered {
        events.push(DoorEvent::DwellStarted(id));
    }
    Ok(())
}

fn close_into<A: DoorArena + ?Sized>(
    arena: &mut A,
    id: DoorsId,
    events: &mut Vec<DoorEvent>,
) -> Result<(), LiftError> {
    let doors = arena.doors_mut(id)?;
    doors.status = DoorStatus::Closed;
    let paired = doors.paired;
    debug!("{} doors closing", id);

    if let Some(paired) = paired {
        if !arena.doors(paired)?.are_closed() {
            close_into(arena, paired, events)?;
        }
    }

    events.push(DoorEvent::Closed(id));
    Ok(())
}
