pub mod drive;
pub mod floorset;
pub mod fsm;
pub mod registry;

mod drive_tests;
mod floorset_tests;

pub use drive::CarDrive;
pub use fsm::CarFSM;

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::thread::{spawn as spawn_thread, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::drive::{DestRequest, DriveNotification};
use crate::shared::{Dropoff, Pickup};

/***************************************/
/*             Public API              */
/***************************************/
/// Request-side handle to one car: the dispatcher forwards hall calls to
/// `pickups()`, passengers aboard submit car calls to `dropoffs()`.
#[derive(Clone)]
pub struct Car {
    id: usize,
    pickup_tx: cbc::Sender<Pickup>,
    dropoff_tx: cbc::Sender<Dropoff>,
}

impl Car {
    pub(crate) fn new(
        id: usize,
        pickup_tx: cbc::Sender<Pickup>,
        dropoff_tx: cbc::Sender<Dropoff>,
    ) -> Car {
        Car {
            id,
            pickup_tx,
            dropoff_tx,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pickups(&self) -> &cbc::Sender<Pickup> {
        &self.pickup_tx
    }

    pub fn dropoffs(&self) -> &cbc::Sender<Dropoff> {
        &self.dropoff_tx
    }
}

pub struct CarThreads {
    pub fsm: JoinHandle<()>,
    pub drive: JoinHandle<()>,
}

/// Wires up and starts one car: a drive thread and a scheduler thread
/// exchanging messages, both listening on `terminate_rx` for teardown.
pub fn spawn(
    id: usize,
    n_floors: u8,
    time_between_floors: Duration,
    terminate_rx: cbc::Receiver<()>,
) -> (Car, CarThreads) {
    let (pickup_tx, pickup_rx) = cbc::unbounded::<Pickup>();
    let (dropoff_tx, dropoff_rx) = cbc::unbounded::<Dropoff>();
    let (drive_request_tx, drive_request_rx) = cbc::unbounded::<DestRequest>();
    let (drive_notification_tx, drive_notification_rx) = cbc::unbounded::<DriveNotification>();

    let drive = CarDrive::new(
        id,
        n_floors,
        time_between_floors,
        drive_request_rx,
        drive_notification_tx,
        terminate_rx.clone(),
    );
    let fsm = CarFSM::new(
        id,
        n_floors,
        pickup_rx,
        dropoff_rx,
        drive_request_tx,
        drive_notification_rx,
        terminate_rx,
    );

    let drive_thread = spawn_thread(move || drive.run());
    let fsm_thread = spawn_thread(move || fsm.run());

    (
        Car::new(id, pickup_tx, dropoff_tx),
        CarThreads {
            fsm: fsm_thread,
            drive: drive_thread,
        },
    )
}
