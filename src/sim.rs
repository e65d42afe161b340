//! Simulation orchestrator (§5, §10.5): the Rust-native realization of
//! "launching N+1 processes" as N+1 OS threads sharing one in-process
//! `World`.

use std::thread;

use neurite_transport::World;

use crate::config::Model;
use crate::error::{Outcome, TooFewNeuronsError};
use crate::master;
use crate::worker::Worker;

/// Runs the full simulation for `world_size` ranks (rank 0 is the master,
/// ranks 1..world_size are workers) against `model`.
///
/// If `workers > model.population.len()`, refuses before building the
/// `World` or sending any message, per §6's "workers > neurons" contract.
pub fn run(model: Model, world_size: usize) -> Outcome {
    let workers = world_size - 1;
    if workers > model.population.len() {
        let err = TooFewNeuronsError {
            neurons: model.population.len(),
            workers,
        };
        log::error!("{err}");
        return Outcome::TooFewNeurons(err);
    }

    let mut world = World::new(world_size);
    let endpoints: Vec<_> = (0..world_size).map(|rank| world.endpoint_for(rank)).collect();
    let mut endpoints = endpoints.into_iter();
    let master_endpoint = endpoints.next().expect("world_size >= 1");

    let horizon = model.horizon;
    let population = model.population;
    let devices = model.devices;

    thread::scope(|scope| {
        scope.spawn(|| master::run(master_endpoint, &population, horizon));

        for endpoint in endpoints {
            let worker_population = population.clone();
            let worker_devices = devices.clone();
            scope.spawn(move || {
                Worker::new(endpoint, worker_population, worker_devices, horizon).run();
            });
        }
    });

    Outcome::Completed
}
