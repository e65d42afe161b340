//! Worker Simulation Loop (§4.4, §4.7): per-tick stimulus application,
//! remote-fetch data exchange, integration, and tick advance.

use neurite_state::{Mirror, UNKNOWN};
use neurite_transport::Endpoint;

use crate::device::Device;
use crate::graph::Population;
use crate::reader;

/// One worker rank's simulation state. Holds the full graph structure (for
/// connection topology and owner lookups) plus the transient per-tick
/// mirror of every neuron's activity level (§3: "Mirrors").
pub struct Worker {
    endpoint: Endpoint,
    population: Population,
    activity: Mirror,
    next_value: Vec<i32>,
    owned_ids: Vec<usize>,
    devices: Vec<Device>,
    horizon: i64,
    rank: usize,
    current_tick: i64,
    loaded_all_data: bool,
    need_to_send_done: bool,
    getting_data: bool,
    need_to_handle_io: bool,
    reader_enabled: bool,
}

impl Worker {
    /// Builds a worker for `endpoint`'s rank. `population` is this worker's
    /// full copy of the static graph, not yet annotated with ownership;
    /// ownership is applied once the `CONFIG` broadcast arrives.
    pub fn new(endpoint: Endpoint, population: Population, devices: Vec<Device>, horizon: i64) -> Self {
        let rank = endpoint.rank();
        let neuron_count = population.len();
        Self {
            endpoint,
            population,
            activity: Mirror::new(neuron_count),
            next_value: vec![UNKNOWN; neuron_count],
            owned_ids: Vec::new(),
            devices,
            horizon,
            rank,
            current_tick: 0,
            loaded_all_data: false,
            need_to_send_done: true,
            getting_data: false,
            need_to_handle_io: true,
            reader_enabled: rank == 1,
        }
    }

    /// Runs this worker to completion: awaits its assignment, then drives
    /// `horizon` ticks, then detaches its send buffer (§9).
    pub fn run(mut self) {
        self.await_assignment();
        while self.current_tick < self.horizon {
            self.run_tick();
        }
        self.endpoint.detach_send_buffer();
    }

    /// Blocks (via non-blocking poll) until both `TASK` and `CONFIG` have
    /// arrived, then applies the owner table to the local graph (§4.2).
    fn await_assignment(&mut self) {
        let mut task = None;
        let mut config = None;
        while task.is_none() || config.is_none() {
            if task.is_none() {
                task = self.endpoint.try_recv_task();
            }
            if config.is_none() {
                config = self.endpoint.try_recv_config();
            }
            if task.is_none() || config.is_none() {
                std::thread::yield_now();
            }
        }

        for (neuron_id, owner) in config.unwrap() {
            if neuron_id >= 0 {
                self.population.apply_owner(neuron_id as usize, owner as usize);
            }
        }

        self.owned_ids = task
            .unwrap()
            .into_iter()
            .filter(|&id| id >= 0)
            .map(|id| id as usize)
            .collect();
        self.owned_ids.sort_unstable();
    }

    /// Drives one tick: repeats (a)-(f) until `TIME_UPDATE` is consumed.
    fn run_tick(&mut self) {
        loop {
            self.apply_stimulus();
            self.service_data_request();
            self.apply_data_response();
            self.integration_attempt();
            self.announce_completion();
            if self.try_tick_advance() {
                break;
            }
            std::thread::yield_now();
        }
    }

    /// (a) Forces owned, stimulus-bound neurons to activity 10 for ticks in
    /// the device's active window. Runs once per tick.
    fn apply_stimulus(&mut self) {
        if !self.need_to_handle_io {
            return;
        }
        for device in &self.devices {
            if device.is_active_at(self.current_tick) {
                for &id in device.neurons() {
                    if self.owns(id) {
                        self.activity.set(id, 10);
                    }
                }
            }
        }
        self.need_to_handle_io = false;
    }

    /// (b) Services one pending `DATA_REQUEST` for a locally-owned neuron.
    fn service_data_request(&mut self) {
        if let Some((neuron_id, requester_rank)) = self.endpoint.try_recv_data_request() {
            let id = neuron_id as usize;
            if self.owns(id) {
                let value = self.activity.get(id);
                self.endpoint.send_data_response(requester_rank, value, neuron_id);
            } else {
                log::warn!(
                    "rank {}: data request for neuron {neuron_id} not found locally",
                    self.rank
                );
            }
        }
    }

    /// (c) Applies one pending `DATA_RESPONSE`, clearing the `getting_data`
    /// latch.
    fn apply_data_response(&mut self) {
        if let Some((activity, _responder_rank, neuron_id)) = self.endpoint.try_recv_data_response() {
            let value = if activity == UNKNOWN { 0 } else { activity };
            self.activity.set(neuron_id as usize, value);
            self.getting_data = false;
        }
    }

    /// (d) Attempts to compute `next_value` for every owned neuron still
    /// unresolved this tick, issuing at most one outstanding `DATA_REQUEST`
    /// across all neurons at a time (§9, the single-slot `getting_data`
    /// latch).
    fn integration_attempt(&mut self) {
        if self.loaded_all_data {
            return;
        }

        for i in 0..self.owned_ids.len() {
            let id = self.owned_ids[i];
            if self.next_value[id] != UNKNOWN {
                continue;
            }

            let connections = self.population.get(id).expect("owned id exists").connections.clone();
            let mut total = 0.0f64;
            let mut all_known = true;

            for conn in &connections {
                let mut value = self.activity.get(conn.source_id);
                if value == UNKNOWN {
                    if self.owns(conn.source_id) {
                        self.activity.set(conn.source_id, 0);
                        value = 0;
                    } else if !self.getting_data {
                        let owner = self.population.get(conn.source_id).expect("valid source id").owner;
                        self.endpoint.send_data_request(owner, conn.source_id as i32);
                        self.getting_data = true;
                        all_known = false;
                        break;
                    } else {
                        all_known = false;
                        break;
                    }
                }
                total += conn.sensitivity * value as f64;
            }

            if all_known {
                self.next_value[id] = (total.floor() as i32).min(10);
            }
        }

        if self.owned_ids.iter().all(|&id| self.next_value[id] != UNKNOWN) {
            self.loaded_all_data = true;
        }
    }

    /// (e) Sends `TASK_DONE` once this tick's integration is complete.
    fn announce_completion(&mut self) {
        if self.loaded_all_data && self.need_to_send_done {
            self.endpoint.send_task_done();
            self.need_to_send_done = false;
        }
    }

    /// (f) Consumes a pending `TIME_UPDATE`: emits Reader output, commits
    /// owned neurons' `next_value`, resets mirrors for non-owned neurons via
    /// [`Mirror::reset_non_owned`], and re-arms per-tick state. Returns
    /// `true` if a `TIME_UPDATE` was consumed.
    fn try_tick_advance(&mut self) -> bool {
        if !self.endpoint.try_recv_time_update() {
            return false;
        }

        if self.reader_enabled {
            self.emit_reader_output();
        }

        for &id in &self.owned_ids {
            let next = self.next_value[id];
            self.activity.set(id, next);
            self.next_value[id] = UNKNOWN;
        }

        let population = &self.population;
        let rank = self.rank;
        self.activity
            .reset_non_owned(|id| population.get(id).map(|n| n.owner == rank).unwrap_or(false));

        self.need_to_send_done = true;
        self.need_to_handle_io = true;
        self.loaded_all_data = false;
        self.getting_data = false;
        self.current_tick += 1;
        true
    }

    /// Reports every neuron in this rank's local table, not just the ones
    /// it owns — it prints whatever its local mirror currently holds,
    /// which is the `-1` sentinel for any non-owned neuron this rank has
    /// not needed to resolve this tick. Matches the original's unfiltered
    /// walk over its full neuron list (see DESIGN.md).
    fn emit_reader_output(&self) {
        for id in 0..self.population.len() {
            println!("{}", reader::format_line(self.current_tick, id, self.activity.get(id)));
        }
    }

    fn owns(&self, neuron_id: usize) -> bool {
        self.population
            .get(neuron_id)
            .map(|n| n.owner == self.rank)
            .unwrap_or(false)
    }
}
