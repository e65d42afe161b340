//! A distributed discrete-time simulator for a directed graph of neuron
//! nodes: partitions a neuron population across worker ranks and advances
//! their activity levels in lock-step, exchanging neighbor activity over a
//! message-passing fabric where dependencies cross rank boundaries.

pub mod config;
pub mod device;
pub mod error;
pub mod graph;
pub mod master;
pub mod partition;
pub mod reader;
pub mod sim;
pub mod worker;

pub use config::Model;
pub use device::Device;
pub use error::{ConfigError, ConfigParseError, ConfigSemanticError, Outcome, TooFewNeuronsError};
pub use graph::{Connection, GraphError, Neuron, Population};
