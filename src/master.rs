//! Master Coordinator (§4.5): disseminates assignments, counts per-tick
//! completions, and drives the global tick-advance broadcast.

use neurite_transport::Endpoint;

use crate::graph::Population;
use crate::partition::{max_ownership_len, padded_task_payload, partition};

/// Runs the master rank to completion: disseminates the partition, then
/// loops counting `TASK_DONE` until `horizon` ticks have advanced.
///
/// `workers` must already have been validated against `population.len()` by
/// the caller (the "workers > neurons" refusal happens before this is ever
/// spawned, per §6).
pub fn run(mut endpoint: Endpoint, population: &Population, horizon: i64) {
    let workers = endpoint.world_size() - 1;
    let part = partition(population, workers).expect("caller validated workers <= neurons");
    let max_len = max_ownership_len(population.len(), workers);
    let owner_table = part.owner_table.to_flat_pairs();

    for rank in 1..=workers {
        let payload = padded_task_payload(&part.ownership_sets[rank - 1], max_len);
        endpoint.send_task(rank, payload);
        endpoint.send_config(rank, owner_table.clone());
    }

    let mut current_tick = 0i64;
    let mut done_count = 0usize;

    while current_tick < horizon {
        if endpoint.try_recv_task_done() {
            done_count += 1;
            if done_count == workers {
                done_count = 0;
                for rank in 1..=workers {
                    endpoint.send_time_update(rank);
                }
                current_tick += 1;
                log::info!("tick {current_tick}/{horizon} complete");
            }
        } else {
            std::thread::yield_now();
        }
    }

    endpoint.detach_send_buffer();
}
