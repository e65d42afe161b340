//! The six message kinds exchanged over the global communicator (§4.3).

/// A tagged message moving between simulation ranks.
///
/// Each variant corresponds to one row of the message protocol table: its
/// name is the tag, its fields are the wire payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// master → worker: this worker's ownership set, `-1`-padded to
    /// `ceil(N / W)` entries.
    Task(Vec<i32>),
    /// master → worker: the full owner table, as flat `(neuron_id, owner_rank)`
    /// pairs.
    Config(Vec<(i32, i32)>),
    /// worker → worker: "send me your current activity for `neuron_id`".
    DataRequest { neuron_id: i32, requester_rank: usize },
    /// worker → worker: the reply to a [`Message::DataRequest`].
    DataResponse {
        activity: i32,
        responder_rank: usize,
        neuron_id: i32,
    },
    /// master → worker: begin the next tick. The payload carries no
    /// information beyond its arrival.
    TimeUpdate,
    /// worker → master: this worker's tick computation is complete.
    TaskDone,
}
