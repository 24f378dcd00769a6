pub mod building;
pub mod button;
pub mod console;
pub mod doors;
pub mod elevator;
pub mod floor;

mod building_tests;

pub use building::Action;
pub use building::Building;
pub use button::{Button, ButtonOwner};
pub use console::FloorConsole;
pub use doors::{DoorArena, DoorEvent, Doors, DoorsId};
pub use elevator::Elevator;
pub use floor::Floor;
