/**
 * # Car Drive
 * Moves one car over time, one floor per tick.
 *
 * The drive owns the car's physical position. It accepts destination
 * requests over a request/reply channel pair and reports every floor it
 * passes or stops at over the notification channel. A destination change is
 * bounded: the drive never reverses mid-trip, it only starts from rest,
 * stops short, or extends the current trip. The reply always carries the
 * destination actually in effect, so the requester can reconcile.
 *
 * # Fields
 * - `floor`:               Last floor passed, or the resting floor when idle.
 * - `dest`:                Current destination. Equals `floor` when idle.
 * - `dir`:                 Direction of travel. `Idle` when at rest.
 * - `time_between_floors`: Wall time the car takes to traverse one floor.
 * - `deadline`:            Next tick, armed while moving.
 * - `request_rx`:          Receiver for destination requests.
 * - `notification_tx`:     Sender for pass/stop notifications.
 * - `terminate_rx`:        Receiver for the shutdown signal.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{direction_to, is_between, Direction};

/***************************************/
/*       Public data structures        */
/***************************************/
/// Request to drive to `target`. The drive replies on `reply_tx` with the
/// destination in effect after applying its accept rules.
pub struct DestRequest {
    pub target: u8,
    pub reply_tx: cbc::Sender<u8>,
}

/// The car passed or stopped at `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveNotification {
    pub floor: u8,
    pub stopping: bool,
}

/***************************************/
/*             Public API              */
/***************************************/
pub struct CarDrive {
    id: usize,
    n_floors: u8,
    floor: u8,
    dest: u8,
    dir: Direction,
    time_between_floors: Duration,
    deadline: Option<Instant>,
    request_rx: cbc::Receiver<DestRequest>,
    notification_tx: cbc::Sender<DriveNotification>,
    terminate_rx: cbc::Receiver<()>,
}

impl CarDrive {
    pub fn new(
        id: usize,
        n_floors: u8,
        time_between_floors: Duration,
        request_rx: cbc::Receiver<DestRequest>,
        notification_tx: cbc::Sender<DriveNotification>,
        terminate_rx: cbc::Receiver<()>,
    ) -> CarDrive {
        CarDrive {
            id,
            n_floors,
            floor: 0,
            dest: 0,
            dir: Direction::Idle,
            time_between_floors,
            deadline: None,
            request_rx,
            notification_tx,
            terminate_rx,
        }
    }

    pub fn run(mut self) {
        // Main loop
        loop {
            let tick = match self.deadline {
                Some(at) => cbc::at(at),
                None => cbc::never(),
            };

            cbc::select! {
                recv(self.request_rx) -> msg => {
                    match msg {
                        Ok(request) => self.handle_request(request),
                        Err(_) => break,
                    }
                }
                recv(tick) -> _ => {
                    if !self.advance() {
                        break;
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    break;
                }
            }
        }
    }

    // Accept rules: start from rest towards any other floor, stop short on
    // the current side, or extend past the destination in the direction of
    // travel. Anything else leaves the destination unchanged.
    fn handle_request(&mut self, request: DestRequest) {
        assert!(
            request.target < self.n_floors,
            "Drive-{}: destination {} out of range",
            self.id,
            request.target
        );

        if self.dir == Direction::Idle {
            if request.target != self.floor {
                self.dest = request.target;
                self.dir = direction_to(self.floor, self.dest);
                self.deadline = Some(Instant::now() + self.time_between_floors);
                info!(
                    "Drive-{}: at {} going {:?} to {}",
                    self.id, self.floor, self.dir, self.dest
                );
            }
        } else if is_between(request.target, self.floor, self.dest) {
            debug!(
                "Drive-{}: stopping short at {} instead of {}",
                self.id, request.target, self.dest
            );
            self.dest = request.target;
        } else if direction_to(self.dest, request.target) == self.dir {
            debug!(
                "Drive-{}: extending past {} to {}",
                self.id, self.dest, request.target
            );
            self.dest = request.target;
        }

        if request.reply_tx.send(self.dest).is_err() {
            warn!("Drive-{}: requester gone before reply", self.id);
        }
    }

    // One tick: move a floor, report it, come to rest on reaching the
    // destination. Returns false when the notification peer is gone.
    fn advance(&mut self) -> bool {
        self.floor = self.dir.apply(self.floor);
        let stopping = self.floor == self.dest;

        if stopping {
            info!("Drive-{}: stopped at {}", self.id, self.floor);
            self.dir = Direction::Idle;
            self.deadline = None;
        } else {
            debug!(
                "Drive-{}: passing {} going {:?}",
                self.id, self.floor, self.dir
            );
            self.deadline = Some(Instant::now() + self.time_between_floors);
        }

        self.notification_tx
            .send(DriveNotification {
                floor: self.floor,
                stopping,
            })
            .is_ok()
    }
}
