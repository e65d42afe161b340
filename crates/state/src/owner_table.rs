//! Global mapping from neuron id to the worker rank that owns it.

use std::collections::HashMap;

use thiserror::Error;

/// Errors surfaced while building or applying an [`OwnerTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnerTableError {
    /// A (neuron_id, owner_rank) pair referenced a neuron id outside the
    /// population, or the table is missing an entry for one.
    #[error("owner table entry references unknown neuron id {0}")]
    UnknownNeuron(usize),
}

/// Read-only, process-wide mapping from neuron id to owning worker rank.
///
/// Built once by the partitioner (see `neurite-mesh`'s `partition` module)
/// and identical on every rank after dissemination (§4.2 of the design).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerTable {
    owners: HashMap<usize, usize>,
}

impl OwnerTable {
    /// Builds a table from `(neuron_id, owner_rank)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            owners: pairs.into_iter().collect(),
        }
    }

    /// Returns the owning rank for `neuron_id`, if known.
    pub fn owner_of(&self, neuron_id: usize) -> Option<usize> {
        self.owners.get(&neuron_id).copied()
    }

    /// Number of neurons described by this table.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// True when the table describes no neurons.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Flattens the table into the wire form used by the CONFIG broadcast:
    /// a sequence of `(neuron_id, owner_rank)` pairs, `2 * len()` integers
    /// once each pair is unpacked.
    pub fn to_flat_pairs(&self) -> Vec<(i32, i32)> {
        let mut pairs: Vec<(i32, i32)> = self
            .owners
            .iter()
            .map(|(&id, &owner)| (id as i32, owner as i32))
            .collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs
    }

    /// Reconstructs a table from the flat wire form produced by
    /// [`to_flat_pairs`](Self::to_flat_pairs).
    pub fn from_flat_pairs(pairs: &[(i32, i32)]) -> Result<Self, OwnerTableError> {
        let mut owners = HashMap::with_capacity(pairs.len());
        for &(id, owner) in pairs {
            if id < 0 {
                return Err(OwnerTableError::UnknownNeuron(id.max(0) as usize));
            }
            owners.insert(id as usize, owner as usize);
        }
        Ok(Self { owners })
    }

    /// Ids owned by `rank`, in ascending order.
    pub fn owned_by(&self, rank: usize) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .owners
            .iter()
            .filter(|&(_, &owner)| owner == rank)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
