/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match *self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => panic!("IDLE has no opposite direction"),
        }
    }

    pub fn offset(&self) -> i16 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => panic!("IDLE has no step offset"),
        }
    }

    /// The neighbouring floor in this direction. Requires `Up` or `Down`.
    pub fn apply(&self, floor: u8) -> u8 {
        (floor as i16 + self.offset()) as u8
    }
}

/// Direction of travel from `from` to `to`: `Idle` when they are equal.
pub fn direction_to(from: u8, to: u8) -> Direction {
    if to > from {
        Direction::Up
    } else if to < from {
        Direction::Down
    } else {
        Direction::Idle
    }
}

/// True when `floor` lies strictly between `a` and `b`, in either order.
pub fn is_between(floor: u8, a: u8, b: u8) -> bool {
    (a < floor && floor < b) || (b < floor && floor < a)
}

/// One-shot sink for a single [`Arrival`]. Delivered to exactly once, then
/// dropped; dropping without delivery closes the sink.
pub type Waiter = cbc::Sender<Arrival>;

/// Hall call: a ride request made from a floor, towards a direction.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub floor: u8,
    pub dir: Direction,
    pub done: Waiter,
}

/// Car call: a ride request made from inside a car, towards a floor.
#[derive(Debug, Clone)]
pub struct Dropoff {
    pub floor: u8,
    pub done: Waiter,
}

/// Sent to waiters when a car stops. `dir` is the direction the car departs
/// in, `Idle` when it has no further work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub floor: u8,
    pub dir: Direction,
    pub car: usize,
}
