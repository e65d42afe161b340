//! Per-rank mailboxes wiring the six message kinds between ranks.
//!
//! Every rank that needs a wildcard-source inbox (the master's `TASK_DONE`
//! inbox; every worker's `DATA_REQUEST` and `DATA_RESPONSE` inboxes) gets one
//! multi-producer channel. Master-to-worker tick signals (`TASK`, `CONFIG`,
//! `TIME_UPDATE`) get one channel per destination rank. All channels are
//! unbounded, which is the channel-level analogue of MPI's buffered-send
//! contract: a send never blocks waiting for a matching receive.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::message::Message;
use crate::send_buffer::SendBuffer;

/// Builds and owns every mailbox in the mesh, then hands out one
/// [`Endpoint`] per rank.
pub struct World {
    world_size: usize,
    task_tx: Vec<Sender<Message>>,
    task_rx: Vec<Option<Receiver<Message>>>,
    config_tx: Vec<Sender<Message>>,
    config_rx: Vec<Option<Receiver<Message>>>,
    time_update_tx: Vec<Sender<Message>>,
    time_update_rx: Vec<Option<Receiver<Message>>>,
    task_done_tx: Sender<Message>,
    task_done_rx: Option<Receiver<Message>>,
    data_request_tx: Vec<Sender<Message>>,
    data_request_rx: Vec<Option<Receiver<Message>>>,
    data_response_tx: Vec<Sender<Message>>,
    data_response_rx: Vec<Option<Receiver<Message>>>,
}

fn per_rank_channels(world_size: usize) -> (Vec<Sender<Message>>, Vec<Option<Receiver<Message>>>) {
    let mut tx = Vec::with_capacity(world_size);
    let mut rx = Vec::with_capacity(world_size);
    for _ in 0..world_size {
        let (s, r) = unbounded();
        tx.push(s);
        rx.push(Some(r));
    }
    (tx, rx)
}

impl World {
    /// Builds a world with `world_size` ranks (rank 0 is the master).
    pub fn new(world_size: usize) -> Self {
        let (task_tx, task_rx) = per_rank_channels(world_size);
        let (config_tx, config_rx) = per_rank_channels(world_size);
        let (time_update_tx, time_update_rx) = per_rank_channels(world_size);
        let (data_request_tx, data_request_rx) = per_rank_channels(world_size);
        let (data_response_tx, data_response_rx) = per_rank_channels(world_size);
        let (task_done_tx, task_done_rx) = unbounded();

        Self {
            world_size,
            task_tx,
            task_rx,
            config_tx,
            config_rx,
            time_update_tx,
            time_update_rx,
            task_done_tx,
            task_done_rx: Some(task_done_rx),
            data_request_tx,
            data_request_rx,
            data_response_tx,
            data_response_rx,
        }
    }

    /// Hands out the [`Endpoint`] for `rank`. Panics if called twice for the
    /// same rank: a rank's inbound receivers can only have one owner.
    pub fn endpoint_for(&mut self, rank: usize) -> Endpoint {
        Endpoint {
            rank,
            world_size: self.world_size,
            task_tx: self.task_tx.clone(),
            config_tx: self.config_tx.clone(),
            time_update_tx: self.time_update_tx.clone(),
            task_done_tx: self.task_done_tx.clone(),
            data_request_tx: self.data_request_tx.clone(),
            data_response_tx: self.data_response_tx.clone(),
            task_rx: self.task_rx[rank].take().expect("endpoint already taken"),
            config_rx: self.config_rx[rank].take().expect("endpoint already taken"),
            time_update_rx: self.time_update_rx[rank]
                .take()
                .expect("endpoint already taken"),
            task_done_rx: if rank == 0 {
                self.task_done_rx.take()
            } else {
                None
            },
            data_request_rx: self.data_request_rx[rank]
                .take()
                .expect("endpoint already taken"),
            data_response_rx: self.data_response_rx[rank]
                .take()
                .expect("endpoint already taken"),
            send_buffer: SendBuffer::attach(rank, world_size),
        }
    }
}

/// A single rank's view of the mesh: senders to reach any other rank on any
/// tag, and the receivers for the mailboxes this rank owns.
pub struct Endpoint {
    rank: usize,
    world_size: usize,
    task_tx: Vec<Sender<Message>>,
    config_tx: Vec<Sender<Message>>,
    time_update_tx: Vec<Sender<Message>>,
    task_done_tx: Sender<Message>,
    data_request_tx: Vec<Sender<Message>>,
    data_response_tx: Vec<Sender<Message>>,
    task_rx: Receiver<Message>,
    config_rx: Receiver<Message>,
    time_update_rx: Receiver<Message>,
    task_done_rx: Option<Receiver<Message>>,
    data_request_rx: Receiver<Message>,
    data_response_rx: Receiver<Message>,
    send_buffer: SendBuffer,
}

impl Endpoint {
    /// This rank's number.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of ranks in the mesh (including the master).
    pub fn world_size(&self) -> usize {
        self.world_size
    }

    /// Sends the `TASK` ownership set to worker `dst_rank`.
    pub fn send_task(&self, dst_rank: usize, ownership_set: Vec<i32>) {
        let _ = self.task_tx[dst_rank].send(Message::Task(ownership_set));
    }

    /// Sends the `CONFIG` owner table to worker `dst_rank`.
    pub fn send_config(&self, dst_rank: usize, owner_table: Vec<(i32, i32)>) {
        let _ = self.config_tx[dst_rank].send(Message::Config(owner_table));
    }

    /// Sends `TIME_UPDATE` to worker `dst_rank`.
    pub fn send_time_update(&self, dst_rank: usize) {
        let _ = self.time_update_tx[dst_rank].send(Message::TimeUpdate);
    }

    /// Sends `TASK_DONE` to the master.
    pub fn send_task_done(&self) {
        let _ = self.task_done_tx.send(Message::TaskDone);
    }

    /// Sends a `DATA_REQUEST` for `neuron_id` to its owner `dst_rank`.
    pub fn send_data_request(&self, dst_rank: usize, neuron_id: i32) {
        let _ = self.data_request_tx[dst_rank].send(Message::DataRequest {
            neuron_id,
            requester_rank: self.rank,
        });
    }

    /// Sends a `DATA_RESPONSE` back to `dst_rank`.
    pub fn send_data_response(&self, dst_rank: usize, activity: i32, neuron_id: i32) {
        let _ = self.data_response_tx[dst_rank].send(Message::DataResponse {
            activity,
            responder_rank: self.rank,
            neuron_id,
        });
    }

    /// Non-blocking probe-and-receive of this rank's `TASK` inbox.
    pub fn try_recv_task(&self) -> Option<Vec<i32>> {
        match self.task_rx.try_recv() {
            Ok(Message::Task(ids)) => Some(ids),
            _ => None,
        }
    }

    /// Non-blocking probe-and-receive of this rank's `CONFIG` inbox.
    pub fn try_recv_config(&self) -> Option<Vec<(i32, i32)>> {
        match self.config_rx.try_recv() {
            Ok(Message::Config(pairs)) => Some(pairs),
            _ => None,
        }
    }

    /// Non-blocking probe-and-receive of this rank's `TIME_UPDATE` inbox.
    pub fn try_recv_time_update(&self) -> bool {
        matches!(self.time_update_rx.try_recv(), Ok(Message::TimeUpdate))
    }

    /// Non-blocking probe-and-receive of the master's `TASK_DONE` inbox.
    /// Always returns `false` on a non-master rank.
    pub fn try_recv_task_done(&self) -> bool {
        match &self.task_done_rx {
            Some(rx) => matches!(rx.try_recv(), Ok(Message::TaskDone)),
            None => false,
        }
    }

    /// Non-blocking probe-and-receive of this rank's `DATA_REQUEST` inbox.
    pub fn try_recv_data_request(&self) -> Option<(i32, usize)> {
        match self.data_request_rx.try_recv() {
            Ok(Message::DataRequest {
                neuron_id,
                requester_rank,
            }) => Some((neuron_id, requester_rank)),
            _ => None,
        }
    }

    /// Non-blocking probe-and-receive of this rank's `DATA_RESPONSE` inbox.
    pub fn try_recv_data_response(&self) -> Option<(i32, usize, i32)> {
        match self.data_response_rx.try_recv() {
            Ok(Message::DataResponse {
                activity,
                responder_rank,
                neuron_id,
            }) => Some((activity, responder_rank, neuron_id)),
            _ => None,
        }
    }

    /// Detaches this rank's send buffer. Call once the rank has drained its
    /// last `TIME_UPDATE` and is about to shut down (§9).
    pub fn detach_send_buffer(&mut self) {
        self.send_buffer.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_done_is_counted_at_master_only() {
        let mut world = World::new(3);
        let master = world.endpoint_for(0);
        let w1 = world.endpoint_for(1);
        let w2 = world.endpoint_for(2);

        w1.send_task_done();
        w2.send_task_done();

        assert!(master.try_recv_task_done());
        assert!(master.try_recv_task_done());
        assert!(!master.try_recv_task_done());
        assert!(!w1.try_recv_task_done());
    }

    #[test]
    fn data_request_carries_requester_rank() {
        let mut world = World::new(3);
        let w1 = world.endpoint_for(1);
        let w2 = world.endpoint_for(2);

        w1.send_data_request(2, 5);
        assert_eq!(w2.try_recv_data_request(), Some((5, 1)));
        assert_eq!(w2.try_recv_data_request(), None);
    }

    #[test]
    fn task_and_config_are_point_to_point() {
        let mut world = World::new(3);
        let master = world.endpoint_for(0);
        let w1 = world.endpoint_for(1);
        let w2 = world.endpoint_for(2);

        master.send_task(1, vec![0, -1]);
        master.send_config(1, vec![(0, 1), (1, 2)]);

        assert_eq!(w1.try_recv_task(), Some(vec![0, -1]));
        assert_eq!(w1.try_recv_config(), Some(vec![(0, 1), (1, 2)]));
        assert_eq!(w2.try_recv_task(), None);
    }
}
