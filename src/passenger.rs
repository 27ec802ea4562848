/**
 * # Passenger
 * One simulated ride from a start floor to a destination floor.
 *
 * A passenger presses the hall button (pickup via the dispatcher), waits for
 * a car to arrive, boards, takes a moment to select a floor, presses the car
 * button (dropoff, sent to the car that actually arrived) and rides until
 * the dropoff arrival. Arrival coordinates are checked against the request;
 * a mismatch is a scheduler bug and fails loudly.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::info;
use std::thread;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::Car;
use crate::shared::{direction_to, Arrival, Dropoff, Pickup};
use crate::unwrap_or_exit;

/***************************************/
/*             Public API              */
/***************************************/
pub struct Passenger {
    id: usize,
    start: u8,
    dest: u8,
}

impl Passenger {
    pub fn new(id: usize, start: u8, dest: u8) -> Passenger {
        Passenger { id, start, dest }
    }

    pub fn run(
        self,
        hall_request_tx: &cbc::Sender<Pickup>,
        cars: &[Car],
        time_select_dropoff: Duration,
    ) {
        if self.start == self.dest {
            info!(
                "Passenger-{}: skipping the elevator, already at {}",
                self.id, self.dest
            );
            return;
        }

        // Press the hall button and wait for a car.
        let dir = direction_to(self.start, self.dest);
        let (done_tx, done_rx) = cbc::bounded::<Arrival>(1);
        unwrap_or_exit!(hall_request_tx.send(Pickup {
            floor: self.start,
            dir,
            done: done_tx,
        }));
        info!(
            "Passenger-{}: waiting at {} going {:?}",
            self.id, self.start, dir
        );
        let arrival = unwrap_or_exit!(done_rx.recv());
        if arrival.floor != self.start || arrival.dir != dir {
            panic!(
                "Passenger-{}: waiting at {} {:?}, but was picked up at {} {:?}",
                self.id, self.start, dir, arrival.floor, arrival.dir
            );
        }

        // Board and press the floor button.
        info!(
            "Passenger-{}: boarded Car-{} at {}",
            self.id, arrival.car, self.start
        );
        thread::sleep(time_select_dropoff);
        let (done_tx, done_rx) = cbc::bounded::<Arrival>(1);
        unwrap_or_exit!(cars[arrival.car].dropoffs().send(Dropoff {
            floor: self.dest,
            done: done_tx,
        }));

        // Ride to the destination.
        let arrival = unwrap_or_exit!(done_rx.recv());
        if arrival.floor != self.dest {
            panic!(
                "Passenger-{}: riding to {}, but was dropped off at {}",
                self.id, self.dest, arrival.floor
            );
        }
        info!("Passenger-{}: arrived at {}", self.id, self.dest);
    }
}
