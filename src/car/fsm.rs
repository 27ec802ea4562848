/**
 * # Car FSM
 * Service scheduler for a single car.
 *
 * The `CarFSM` (Finite State Machine) owns the car's pending requests and
 * continuously decides the next floor to visit. It follows the SCAN/LOOK
 * discipline: while moving it services every dropoff and same-direction
 * pickup ahead of it, and only reverses once nothing remains in the current
 * direction. It communicates with the dispatcher, onboard passengers and the
 * drive thread.
 *
 * # Fields
 * - `floor`:                 Last floor passed (resting floor when idle).
 * - `dir`:                   Current direction of travel.
 * - `dest`:                  Destination agreed with the drive. Invariant:
 *                            `dir == direction_to(floor, dest)`; when idle,
 *                            `dest == floor`.
 * - `dropoffs`:              Floors requested from inside the car.
 * - `pickups_up`:            Floors with an outstanding UP hall call.
 * - `pickups_down`:          Floors with an outstanding DOWN hall call.
 * - `waiters`:               Arrival registry, notified on each stop.
 * - `pickup_rx`:             Receives hall calls from the dispatcher.
 * - `dropoff_rx`:            Receives car calls from passengers.
 * - `drive_request_tx`:      Sends destination requests to the drive.
 * - `drive_notification_rx`: Receives pass/stop reports from the drive.
 * - `terminate_rx`:          Receiver for the shutdown signal.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::drive::{DestRequest, DriveNotification};
use crate::car::floorset::FloorSet;
use crate::car::registry::{self, ArrivalRegistry};
use crate::shared::{direction_to, is_between, Arrival, Direction, Dropoff, Pickup};
use crate::unwrap_or_exit;

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    PickupReceived(Pickup),
    DropoffReceived(Dropoff),
    DriveUpdate(DriveNotification),
}

/***************************************/
/*             Public API              */
/***************************************/
pub struct CarFSM {
    // Private fields
    id: usize,
    n_floors: u8,
    floor: u8,
    dir: Direction,
    dest: u8,
    dropoffs: FloorSet,
    pickups_up: FloorSet,
    pickups_down: FloorSet,
    waiters: ArrivalRegistry,

    // Dispatcher and passenger channels
    pickup_rx: cbc::Receiver<Pickup>,
    dropoff_rx: cbc::Receiver<Dropoff>,

    // Drive channels
    drive_request_tx: cbc::Sender<DestRequest>,
    drive_notification_rx: cbc::Receiver<DriveNotification>,

    terminate_rx: cbc::Receiver<()>,
}

impl CarFSM {
    pub fn new(
        id: usize,
        n_floors: u8,
        pickup_rx: cbc::Receiver<Pickup>,
        dropoff_rx: cbc::Receiver<Dropoff>,
        drive_request_tx: cbc::Sender<DestRequest>,
        drive_notification_rx: cbc::Receiver<DriveNotification>,
        terminate_rx: cbc::Receiver<()>,
    ) -> CarFSM {
        CarFSM {
            id,
            n_floors,
            floor: 0,
            dir: Direction::Idle,
            dest: 0,
            dropoffs: FloorSet::new(n_floors),
            pickups_up: FloorSet::new(n_floors),
            pickups_down: FloorSet::new(n_floors),
            waiters: ArrivalRegistry::new(),
            pickup_rx,
            dropoff_rx,
            drive_request_tx,
            drive_notification_rx,
            terminate_rx,
        }
    }

    pub fn run(mut self) {
        // Main loop
        loop {
            cbc::select! {
                recv(self.pickup_rx) -> msg => {
                    match msg {
                        Ok(pickup) => self.handle_event(Event::PickupReceived(pickup)),
                        Err(_) => break,
                    }
                }
                recv(self.dropoff_rx) -> msg => {
                    match msg {
                        Ok(dropoff) => self.handle_event(Event::DropoffReceived(dropoff)),
                        Err(_) => break,
                    }
                }
                recv(self.drive_notification_rx) -> msg => {
                    match msg {
                        Ok(notification) => self.handle_event(Event::DriveUpdate(notification)),
                        Err(_) => break,
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    break;
                }
            }
        }

        if !self.waiters.is_empty() {
            info!(
                "Car-{}: shutting down, releasing {} waiters",
                self.id,
                self.waiters.len()
            );
        }
        // Dropping the registry closes every remaining waiter sink.
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::PickupReceived(pickup) => self.on_pickup(pickup),
            Event::DropoffReceived(dropoff) => self.on_dropoff(dropoff),
            Event::DriveUpdate(notification) => self.on_drive_update(notification),
        }
    }

    fn on_pickup(&mut self, pickup: Pickup) {
        assert!(
            pickup.floor < self.n_floors,
            "Car-{}: pickup floor {} out of range",
            self.id,
            pickup.floor
        );
        assert!(
            pickup.dir != Direction::Idle,
            "Car-{}: pickup without a direction",
            self.id
        );
        debug!(
            "Car-{}: pickup {} {:?} received",
            self.id, pickup.floor, pickup.dir
        );

        // Already resting at this floor: the ride starts here and now.
        if self.dir == Direction::Idle && self.floor == pickup.floor {
            registry::deliver(
                pickup.done,
                Arrival {
                    floor: pickup.floor,
                    dir: pickup.dir,
                    car: self.id,
                },
            );
            return;
        }

        self.waiters.add_waiter(pickup.floor, pickup.dir, pickup.done);

        if self.pickups_mut(pickup.dir).set(pickup.floor) {
            // The stop is already scheduled; it will serve this waiter too.
            debug!(
                "Car-{}: pickup {} {:?} already scheduled",
                self.id, pickup.floor, pickup.dir
            );
            return;
        }

        if self.dir == Direction::Idle {
            self.drive_to(pickup.floor);
        } else if self.dir == pickup.dir && is_between(pickup.floor, self.floor, self.dest) {
            // En route and same direction: stop short, then carry on.
            self.drive_to(pickup.floor);
        }
        // Anything else is reached on a later sweep.
    }

    fn on_dropoff(&mut self, dropoff: Dropoff) {
        assert!(
            dropoff.floor < self.n_floors,
            "Car-{}: dropoff floor {} out of range",
            self.id,
            dropoff.floor
        );
        debug!("Car-{}: dropoff {} received", self.id, dropoff.floor);

        if self.dir == Direction::Idle && self.floor == dropoff.floor {
            registry::deliver(
                dropoff.done,
                Arrival {
                    floor: dropoff.floor,
                    dir: Direction::Idle,
                    car: self.id,
                },
            );
            return;
        }

        self.waiters
            .add_waiter(dropoff.floor, Direction::Idle, dropoff.done);

        if self.dropoffs.set(dropoff.floor) {
            debug!("Car-{}: dropoff {} already scheduled", self.id, dropoff.floor);
            return;
        }

        if self.dir == Direction::Idle {
            self.drive_to(dropoff.floor);
        } else if is_between(dropoff.floor, self.floor, self.dest) {
            self.drive_to(dropoff.floor);
        }
    }

    fn on_drive_update(&mut self, notification: DriveNotification) {
        self.floor = notification.floor;
        if !notification.stopping {
            return;
        }

        if notification.floor != self.dest {
            // The drive is authoritative about position; carry on from here.
            warn!(
                "Car-{}: stopped at {} but destination was {}",
                self.id, notification.floor, self.dest
            );
        }

        // Service the current direction at this floor.
        self.dropoffs.clear(self.floor);
        let floor = self.floor;
        self.pickups_mut(self.dir).clear(floor);
        self.waiters.notify_arrival(Arrival {
            floor: self.floor,
            dir: self.dir,
            car: self.id,
        });

        match self.next_stop() {
            Some(next) if next == self.floor => {
                // The only work left here is a hall call the opposite way.
                let opposite = self.dir.opposite();
                let floor = self.floor;
                self.pickups_mut(opposite).clear(floor);
                self.waiters.notify_arrival(Arrival {
                    floor: self.floor,
                    dir: opposite,
                    car: self.id,
                });
                self.dest = self.floor;
                self.dir = Direction::Idle;
            }
            Some(next) => self.drive_to(next),
            None => {
                info!("Car-{}: idle at {}", self.id, self.floor);
                self.dest = self.floor;
                self.dir = Direction::Idle;
            }
        }
    }

    // Next floor to visit, by SCAN/LOOK priority. Tiers 1 and 3 continue a
    // sweep; tiers 2 and 4 reposition to the far end for the next one.
    fn next_stop(&self) -> Option<u8> {
        assert!(
            self.dir != Direction::Idle,
            "Car-{}: next stop computed while idle",
            self.id
        );
        let dir = self.dir;
        let opposite = dir.opposite();

        // 1. Nearest same-direction work ahead: continue the sweep.
        if let Some(next) =
            FloorSet::nearest_across(self.floor, dir, &[&self.dropoffs, self.pickups(dir)])
        {
            return Some(next);
        }

        // 2. Farthest opposite-direction hall call at or ahead: go all the
        //    way out, then reverse.
        if let Some(next) = self.pickups(opposite).furthest(self.floor, dir) {
            return Some(next);
        }

        // 3. Nothing ahead: turn around to the nearest work the other way.
        if let Some(next) =
            FloorSet::nearest_across(self.floor, opposite, &[&self.dropoffs, self.pickups(opposite)])
        {
            return Some(next);
        }

        // 4. Farthest same-direction hall call behind: reposition to the far
        //    end and sweep back.
        if let Some(next) = self.pickups(dir).furthest(self.floor, opposite) {
            return Some(next);
        }

        None
    }

    // Asks the drive for a new destination and reconciles with its reply. A
    // clamped request keeps its floor bit set and is retried on a later
    // event.
    fn drive_to(&mut self, target: u8) {
        if target == self.floor || target == self.dest {
            warn!("Car-{}: superfluous drive request to {}", self.id, target);
            return;
        }

        let (reply_tx, reply_rx) = cbc::bounded::<u8>(1);
        unwrap_or_exit!(self.drive_request_tx.send(DestRequest { target, reply_tx }));
        let effective = unwrap_or_exit!(reply_rx.recv());

        if effective != target {
            debug!(
                "Car-{}: drive kept {} over requested {}",
                self.id, effective, target
            );
        }
        self.dest = effective;
        self.dir = direction_to(self.floor, effective);
    }

    fn pickups(&self, dir: Direction) -> &FloorSet {
        match dir {
            Direction::Up => &self.pickups_up,
            Direction::Down => &self.pickups_down,
            Direction::Idle => panic!("Car-{}: no pickup set for IDLE", self.id),
        }
    }

    fn pickups_mut(&mut self, dir: Direction) -> &mut FloorSet {
        match dir {
            Direction::Up => &mut self.pickups_up,
            Direction::Down => &mut self.pickups_down,
            Direction::Idle => panic!("Car-{}: no pickup set for IDLE", self.id),
        }
    }
}

/***************************************/
/*            Test helpers             */
/***************************************/
#[cfg(test)]
impl CarFSM {
    pub fn test_set_position(&mut self, floor: u8, dir: Direction, dest: u8) {
        self.floor = floor;
        self.dir = dir;
        self.dest = dest;
    }

    pub fn test_state(&self) -> (u8, Direction, u8) {
        (self.floor, self.dir, self.dest)
    }

    pub fn test_dropoffs_mut(&mut self) -> &mut FloorSet {
        &mut self.dropoffs
    }

    pub fn test_pickups_mut(&mut self, dir: Direction) -> &mut FloorSet {
        self.pickups_mut(dir)
    }

    pub fn test_next_stop(&self) -> Option<u8> {
        self.next_stop()
    }
}
