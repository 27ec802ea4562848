/**
 * # Dispatcher
 * Routes each incoming hall call to one car.
 *
 * The dispatcher is the single entry point for hall calls: passengers send
 * pickups here, and the dispatcher forwards each one to the scheduler of a
 * car chosen uniformly at random. Random assignment keeps the cars fully
 * independent; cost-based bidding and cross-car de-duplication of hall calls
 * would slot in here.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::info;
use rand::Rng;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::Car;
use crate::shared::Pickup;
use crate::unwrap_or_exit;

/***************************************/
/*             Public API              */
/***************************************/
pub struct Dispatcher {
    cars: Vec<Car>,
    hall_request_rx: cbc::Receiver<Pickup>,
    terminate_rx: cbc::Receiver<()>,
}

impl Dispatcher {
    pub fn new(
        cars: Vec<Car>,
        hall_request_rx: cbc::Receiver<Pickup>,
        terminate_rx: cbc::Receiver<()>,
    ) -> Dispatcher {
        assert!(!cars.is_empty(), "dispatcher needs at least one car");
        Dispatcher {
            cars,
            hall_request_rx,
            terminate_rx,
        }
    }

    pub fn run(self) {
        let mut rng = rand::thread_rng();

        // Main loop
        loop {
            cbc::select! {
                recv(self.hall_request_rx) -> msg => {
                    match msg {
                        Ok(pickup) => self.assign(&mut rng, pickup),
                        Err(_) => break,
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    break;
                }
            }
        }
    }

    fn assign(&self, rng: &mut impl Rng, pickup: Pickup) {
        let car = &self.cars[rng.gen_range(0..self.cars.len())];
        info!(
            "Dispatcher: hall call {} {:?} assigned to Car-{}",
            pickup.floor,
            pickup.dir,
            car.id()
        );
        unwrap_or_exit!(car.pickups().send(pickup));
    }
}
