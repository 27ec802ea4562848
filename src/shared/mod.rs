pub mod macros;
pub mod structs;

pub use structs::direction_to;
pub use structs::is_between;
pub use structs::Arrival;
pub use structs::Direction;
pub use structs::Dropoff;
pub use structs::Pickup;
pub use structs::Waiter;
