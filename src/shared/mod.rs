pub mod error;
pub mod macros;
pub mod structs;

pub use error::LiftError;
pub use structs::BuildingSnapshot;
pub use structs::ButtonId;
pub use structs::ButtonState;
pub use structs::Direction;
pub use structs::DoorStatus;
pub use structs::ElevatorSnapshot;
pub use structs::FloorSnapshot;
pub use structs::MoveState;
pub use structs::Notification;
