//! Immutable-after-load description of the neuron population (§3).
//!
//! Neurons are stored in a dense, id-indexed `Vec` rather than a linked
//! structure, and connections are `(source_id, sensitivity)` pairs into that
//! same arena. Name lookups are resolved once at load time through
//! [`neurite_utils::NameIndex`] rather than re-walked per reference.

use neurite_utils::NameIndex;

/// One incoming connection: the id of the source neuron and its sensitivity
/// weight in the integration sum (§4.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub source_id: usize,
    pub sensitivity: f64,
}

/// A single neuron in the population.
///
/// `activity_level` and `next_value` use `-1` as the "unknown for this tick"
/// sentinel described in §3; valid committed activity is `0..=10`.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub id: usize,
    pub name: String,
    pub owner: usize,
    pub connections: Vec<Connection>,
    pub activity_level: i32,
    pub next_value: i32,
}

impl Neuron {
    fn new(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            owner: 0,
            connections: Vec::new(),
            activity_level: -1,
            next_value: -1,
        }
    }
}

/// The full neuron population plus the name index used to resolve
/// connection targets while loading.
#[derive(Debug, Default, Clone)]
pub struct Population {
    neurons: Vec<Neuron>,
    names: NameIndex,
}

/// A dangling reference or other structural defect found while assembling a
/// [`Population`] from parsed configuration data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("neuron name '{0}' is not defined")]
    UnknownNeuronName(String),
    #[error("duplicate neuron name '{0}'")]
    DuplicateNeuronName(String),
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a neuron, assigning it the next sequential id (§3: "assigned by
    /// insertion order starting at 0").
    pub fn add_neuron(&mut self, name: &str) -> Result<usize, GraphError> {
        let id = self.neurons.len();
        if !self.names.insert(name, id) {
            return Err(GraphError::DuplicateNeuronName(name.to_string()));
        }
        self.neurons.push(Neuron::new(id, name.to_string()));
        Ok(id)
    }

    /// Resolves `name` to a neuron id.
    pub fn id_of(&self, name: &str) -> Result<usize, GraphError> {
        self.names
            .get(name)
            .ok_or_else(|| GraphError::UnknownNeuronName(name.to_string()))
    }

    /// Adds a connection `source -> target` with the given sensitivity.
    /// Invariant: both ids must already exist in the population.
    pub fn add_connection(&mut self, target: usize, source_id: usize, sensitivity: f64) {
        self.neurons[target]
            .connections
            .push(Connection { source_id, sensitivity });
    }

    /// Number of neurons in the population.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// True when the population has no neurons.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Neuron> {
        self.neurons.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neuron> {
        self.neurons.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.neurons.iter_mut()
    }

    /// Assigns `owner` to every neuron per the disseminated owner table.
    /// Used by workers after receiving the `CONFIG` broadcast (§4.2).
    pub fn apply_owner(&mut self, neuron_id: usize, owner: usize) {
        if let Some(n) = self.neurons.get_mut(neuron_id) {
            n.owner = owner;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_by_insertion_order() {
        let mut pop = Population::new();
        let a = pop.add_neuron("A").unwrap();
        let b = pop.add_neuron("B").unwrap();
        assert_eq!((a, b), (0, 1));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut pop = Population::new();
        pop.add_neuron("A").unwrap();
        assert_eq!(
            pop.add_neuron("A").unwrap_err(),
            GraphError::DuplicateNeuronName("A".into())
        );
    }

    #[test]
    fn id_of_resolves_names() {
        let mut pop = Population::new();
        let a = pop.add_neuron("A").unwrap();
        assert_eq!(pop.id_of("A"), Ok(a));
        assert_eq!(
            pop.id_of("Z"),
            Err(GraphError::UnknownNeuronName("Z".into()))
        );
    }

    #[test]
    fn new_neurons_start_with_unknown_activity() {
        let mut pop = Population::new();
        let a = pop.add_neuron("A").unwrap();
        assert_eq!(pop.get(a).unwrap().activity_level, -1);
        assert_eq!(pop.get(a).unwrap().next_value, -1);
    }
}
