pub mod controller;
pub mod timer;


pub use controller::Controller;
pub use timer::Timer;
