//! Transient per-tick cache of every neuron's latest known activity level.
//!
//! Every worker keeps one [`Mirror`], indexed densely by neuron id. Entries
//! for neurons the worker owns are written directly by the integration step;
//! entries for remote neurons are populated on demand by `DATA_RESPONSE`
//! messages and invalidated at the start of every tick.

use crate::UNKNOWN;

/// Dense per-neuron activity cache, one entry per neuron id.
#[derive(Debug, Clone)]
pub struct Mirror {
    activity: Vec<i32>,
}

impl Mirror {
    /// Creates a mirror for `neuron_count` neurons, all unknown (`-1`).
    pub fn new(neuron_count: usize) -> Self {
        Self {
            activity: vec![UNKNOWN; neuron_count],
        }
    }

    /// Current mirrored activity level for `neuron_id`, or `-1` if unknown
    /// or out of range.
    pub fn get(&self, neuron_id: usize) -> i32 {
        self.activity.get(neuron_id).copied().unwrap_or(UNKNOWN)
    }

    /// Overwrites the mirrored activity level for `neuron_id`.
    pub fn set(&mut self, neuron_id: usize, value: i32) {
        if let Some(slot) = self.activity.get_mut(neuron_id) {
            *slot = value;
        }
    }

    /// Resets every mirrored entry belonging to `owned_ids` to its current
    /// value (no-op) while resetting everything else to `-1`, per the tick
    /// boundary rule in §3/§4.4(f): owned neurons retain last tick's activity
    /// until the caller commits `next_value` over it; non-owned mirrors are
    /// invalidated.
    pub fn reset_non_owned(&mut self, is_owned: impl Fn(usize) -> bool) {
        for (id, slot) in self.activity.iter_mut().enumerate() {
            if !is_owned(id) {
                *slot = UNKNOWN;
            }
        }
    }

    /// Number of neurons tracked by this mirror.
    pub fn len(&self) -> usize {
        self.activity.len()
    }

    /// True when the mirror tracks no neurons.
    pub fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }
}
