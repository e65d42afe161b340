//! Deterministic round-robin mapping of neuron ids to worker ranks (§4.1).

use neurite_state::OwnerTable;

use crate::error::TooFewNeuronsError;
use crate::graph::Population;

/// The result of partitioning: the global owner table plus, per worker rank
/// (1..=W), its ownership set.
pub struct Partition {
    pub owner_table: OwnerTable,
    /// Indexed by `rank - 1`; `ownership_sets[r]` is worker `r + 1`'s set.
    pub ownership_sets: Vec<Vec<usize>>,
}

/// Assigns neuron `i` to worker `1 + (i mod workers)` (§4.1). Fails if
/// `workers > population.len()`.
pub fn partition(population: &Population, workers: usize) -> Result<Partition, TooFewNeuronsError> {
    if workers > population.len() {
        return Err(TooFewNeuronsError {
            neurons: population.len(),
            workers,
        });
    }

    let mut pairs = Vec::with_capacity(population.len());
    let mut ownership_sets = vec![Vec::new(); workers];

    for neuron in population.iter() {
        let rank = 1 + (neuron.id % workers);
        pairs.push((neuron.id as i32, rank as i32));
        ownership_sets[rank - 1].push(neuron.id);
    }

    let owner_table = OwnerTable::from_flat_pairs(&pairs).expect("pairs built from a valid population");

    Ok(Partition {
        owner_table,
        ownership_sets,
    })
}

/// Pads `ownership_set` to `target_len` with the sentinel `-1`, as sent over
/// the wire for the `TASK` message (§4.2).
pub fn padded_task_payload(ownership_set: &[usize], target_len: usize) -> Vec<i32> {
    let mut payload: Vec<i32> = ownership_set.iter().map(|&id| id as i32).collect();
    payload.resize(target_len, -1);
    payload
}

/// `ceil(N / W)`, the maximum ownership-set length sent over the wire (§4.2).
pub fn max_ownership_len(neuron_count: usize, workers: usize) -> usize {
    neurite_utils::ceil_div(neuron_count, workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(n: usize) -> Population {
        let mut pop = Population::new();
        for i in 0..n {
            pop.add_neuron(&format!("n{i}")).unwrap();
        }
        pop
    }

    #[test]
    fn assigns_round_robin() {
        let pop = population(5);
        let part = partition(&pop, 2).unwrap();
        assert_eq!(part.owner_table.owner_of(0).unwrap(), 1);
        assert_eq!(part.owner_table.owner_of(1).unwrap(), 2);
        assert_eq!(part.owner_table.owner_of(2).unwrap(), 1);
        assert_eq!(part.owner_table.owner_of(3).unwrap(), 2);
        assert_eq!(part.owner_table.owner_of(4).unwrap(), 1);
        assert_eq!(part.ownership_sets[0], vec![0, 2, 4]);
        assert_eq!(part.ownership_sets[1], vec![1, 3]);
    }

    #[test]
    fn w_equals_n_gives_distinct_owners() {
        let pop = population(3);
        let part = partition(&pop, 3).unwrap();
        assert_eq!(part.owner_table.owner_of(0).unwrap(), 1);
        assert_eq!(part.owner_table.owner_of(1).unwrap(), 2);
        assert_eq!(part.owner_table.owner_of(2).unwrap(), 3);
    }

    #[test]
    fn rejects_more_workers_than_neurons() {
        let pop = population(2);
        let err = partition(&pop, 3).unwrap_err();
        assert_eq!(err, TooFewNeuronsError { neurons: 2, workers: 3 });
    }

    #[test]
    fn padded_payload_is_padded_with_sentinel() {
        let payload = padded_task_payload(&[0, 2, 4], 4);
        assert_eq!(payload, vec![0, 2, 4, -1]);
    }

    #[test]
    fn max_ownership_len_is_ceil_division() {
        assert_eq!(max_ownership_len(5, 2), 3);
        assert_eq!(max_ownership_len(6, 2), 3);
    }
}
