/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use std::collections::HashMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Arrival, Direction, Waiter};

/***************************************/
/*             Public API              */
/***************************************/
/// Tracks, per `(floor, direction)`, the waiters to be told when the car
/// stops there. Dropoff waiters register under `Idle`; pickup waiters under
/// their requested direction. Each waiter is notified exactly once.
pub struct ArrivalRegistry {
    waiters: HashMap<(u8, Direction), Vec<Waiter>>,
}

impl ArrivalRegistry {
    pub fn new() -> ArrivalRegistry {
        ArrivalRegistry {
            waiters: HashMap::new(),
        }
    }

    pub fn add_waiter(&mut self, floor: u8, dir: Direction, done: Waiter) {
        self.waiters.entry((floor, dir)).or_default().push(done);
    }

    /// Delivers `arrival` to the dropoff waiters for its floor and, when the
    /// arrival carries a direction, to the pickup waiters of that direction.
    /// Delivered waiters are dropped from the registry.
    pub fn notify_arrival(&mut self, arrival: Arrival) {
        self.notify(arrival.floor, Direction::Idle, arrival);
        if arrival.dir != Direction::Idle {
            self.notify(arrival.floor, arrival.dir, arrival);
        }
    }

    fn notify(&mut self, floor: u8, dir: Direction, arrival: Arrival) {
        if let Some(list) = self.waiters.remove(&(floor, dir)) {
            for done in list {
                deliver(done, arrival);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.waiters.values().map(|list| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sends `arrival` down a one-shot sink, consuming it. A receiver that hung
/// up is logged, never dropped silently.
pub fn deliver(done: Waiter, arrival: Arrival) {
    if done.send(arrival).is_err() {
        warn!(
            "Car-{}: waiter for floor {} hung up before arrival",
            arrival.car, arrival.floor
        );
    }
}
