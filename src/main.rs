/* 3rd party libraries */
use crossbeam_channel as cbc;
use log::{error, info};
use rand::Rng;
use std::thread;
use std::time::Duration;

/* Modules */
mod car;
mod config;
mod dispatcher;
mod passenger;
mod shared;

use dispatcher::Dispatcher;
use passenger::Passenger;
use shared::Pickup;

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load the configuration
    let config = config::load_config();
    let n_floors = config.simulation.n_floors;
    let time_between_floors = Duration::from_millis(config.timing.time_between_floors_ms);
    let time_select_dropoff = Duration::from_millis(config.timing.time_select_dropoff_ms);
    let spawn_interval = Duration::from_millis(config.timing.spawn_interval_ms);

    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start one drive thread and one scheduler thread per car
    let mut cars = Vec::new();
    let mut car_threads = Vec::new();
    for id in 0..config.simulation.n_cars {
        let (car, threads) = car::spawn(id, n_floors, time_between_floors, terminate_rx.clone());
        cars.push(car);
        car_threads.push(threads);
    }

    // Start the dispatcher
    let (hall_request_tx, hall_request_rx) = cbc::unbounded::<Pickup>();
    let dispatcher = Dispatcher::new(cars.clone(), hall_request_rx, terminate_rx.clone());
    let dispatcher_thread = thread::spawn(move || dispatcher.run());

    // Release the passenger population
    let mut rng = rand::thread_rng();
    let mut passenger_threads = Vec::new();
    for id in 1..=config.simulation.n_passengers {
        let passenger = Passenger::new(id, rng.gen_range(0..n_floors), rng.gen_range(0..n_floors));
        let hall_request_tx = hall_request_tx.clone();
        let cars = cars.clone();
        passenger_threads.push(thread::spawn(move || {
            passenger.run(&hall_request_tx, &cars, time_select_dropoff)
        }));
        thread::sleep(spawn_interval);
    }

    for handle in passenger_threads {
        if handle.join().is_err() {
            error!("Passenger thread panicked");
            std::process::exit(1);
        }
    }
    info!("All passengers have been serviced");

    // Tear down the bank
    drop(terminate_tx);
    dispatcher_thread.join().expect("dispatcher thread panicked");
    for threads in car_threads {
        threads.fsm.join().expect("scheduler thread panicked");
        threads.drive.join().expect("drive thread panicked");
    }
}
