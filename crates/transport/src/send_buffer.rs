//! Narrative model of the buffered-send lifecycle described in §9.
//!
//! A real MPI buffered send needs a process-local scratch buffer attached
//! before the first send and detached at shutdown. The channel-based
//! transport of this crate never blocks a sender regardless of whether a
//! matching receive is posted (every [`Sender`](crossbeam_channel::Sender) is
//! unbounded), so no such buffer is structurally required. This type exists
//! purely to preserve that lifecycle as an explicit, loggable resource: it is
//! attached once when a rank starts and must be detached only after the
//! rank's last `TIME_UPDATE` has been drained.
#[derive(Debug)]
pub struct SendBuffer {
    rank: usize,
    attached: bool,
}

impl SendBuffer {
    /// Attaches a send buffer for `rank`, sized conceptually for
    /// `2 * world_size` in-flight integers plus overhead (§4.3).
    pub fn attach(rank: usize, world_size: usize) -> Self {
        log::debug!(
            "rank {rank}: attached send buffer ({} bytes notional)",
            2 * world_size * std::mem::size_of::<i32>()
        );
        Self {
            rank,
            attached: true,
        }
    }

    /// Detaches the buffer. Panics if called twice, mirroring the fact that
    /// a double `MPI_Buffer_detach` is a programming error.
    pub fn detach(&mut self) {
        assert!(self.attached, "send buffer for rank {} already detached", self.rank);
        log::debug!("rank {}: detached send buffer", self.rank);
        self.attached = false;
    }
}

impl Drop for SendBuffer {
    fn drop(&mut self) {
        if self.attached {
            log::warn!(
                "rank {}: send buffer dropped while still attached",
                self.rank
            );
        }
    }
}
