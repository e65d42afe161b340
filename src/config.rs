//! `model.json` parsing (§6, §10.3): the one module in this repository that
//! is deliberately a straightforward structured-document reader rather than
//! an engineering focus.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::device::Device;
use crate::error::{ConfigError, ConfigParseError, ConfigSemanticError};
use crate::graph::Population;

/// Default configuration file name when no path is given on the command
/// line (§6).
pub const DEFAULT_CONFIG_PATH: &str = "model.json";

#[derive(Debug, Deserialize)]
struct ConnectionDoc {
    neuron: String,
    #[serde(default)]
    sensitivity: f64,
}

#[derive(Debug, Deserialize)]
struct NeuronDoc {
    name: String,
    #[serde(default)]
    connections: Vec<ConnectionDoc>,
}

#[derive(Debug, Deserialize)]
struct IoConnectionDoc {
    neuron: String,
}

#[derive(Debug, Deserialize)]
struct IoDoc {
    name: String,
    #[serde(rename = "type")]
    kind: i64,
    #[serde(default)]
    connections: Vec<IoConnectionDoc>,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    duration: i64,
    #[serde(default)]
    amplitude: i32,
    #[serde(default, rename = "outputPrefix")]
    output_prefix: String,
}

#[derive(Debug, Deserialize)]
struct ModelDoc {
    #[serde(rename = "simulationLength")]
    simulation_length: i64,
    neurons: Vec<NeuronDoc>,
    io: Vec<IoDoc>,
}

/// The fully validated, in-memory configuration: horizon, population, and
/// device list (§3).
pub struct Model {
    pub horizon: i64,
    pub population: Population,
    pub devices: Vec<Device>,
}

/// Loads and validates the configuration at `path`.
pub fn load(path: &Path) -> Result<Model, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| {
        ConfigParseError::Io {
            path: path.display().to_string(),
            source,
        }
    })?;
    let doc: ModelDoc = serde_json::from_str(&text).map_err(ConfigParseError::Malformed)?;
    Ok(validate(doc)?)
}

fn validate(doc: ModelDoc) -> Result<Model, ConfigSemanticError> {
    if doc.simulation_length <= 0 {
        return Err(ConfigSemanticError::NonPositiveHorizon(doc.simulation_length));
    }
    if doc.neurons.is_empty() {
        return Err(ConfigSemanticError::EmptyPopulation);
    }

    let mut population = Population::new();
    for n in &doc.neurons {
        population
            .add_neuron(&n.name)
            .map_err(|_| ConfigSemanticError::DuplicateNeuron(n.name.clone()))?;
    }

    for n in &doc.neurons {
        let target = population.id_of(&n.name).expect("just inserted");
        for conn in &n.connections {
            let source_id = population
                .id_of(&conn.neuron)
                .map_err(|_| ConfigSemanticError::DanglingConnection {
                    neuron: n.name.clone(),
                    target: conn.neuron.clone(),
                })?;
            population.add_connection(target, source_id, conn.sensitivity);
        }
    }

    if doc.io.is_empty() {
        return Err(ConfigSemanticError::EmptyIoList);
    }

    let mut devices = Vec::with_capacity(doc.io.len());
    for io in &doc.io {
        let mut neurons = Vec::with_capacity(io.connections.len());
        for c in &io.connections {
            let id = population
                .id_of(&c.neuron)
                .map_err(|_| ConfigSemanticError::DanglingIoBinding(io.name.clone(), c.neuron.clone()))?;
            neurons.push(id);
        }
        let device = match io.kind {
            0 => Device::Stimulus {
                name: io.name.clone(),
                offset: io.offset,
                duration: io.duration,
                amplitude: io.amplitude,
                neurons,
            },
            1 => Device::Reader {
                name: io.name.clone(),
                output_prefix: io.output_prefix.clone(),
                neurons,
            },
            other => return Err(ConfigSemanticError::InvalidIoType(io.name.clone(), other)),
        };
        devices.push(device);
    }

    Ok(Model {
        horizon: doc.simulation_length,
        population,
        devices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Model, ConfigError> {
        let doc: ModelDoc = serde_json::from_str(json).map_err(ConfigParseError::Malformed)?;
        Ok(validate(doc)?)
    }

    #[test]
    fn rejects_non_positive_horizon() {
        let json = r#"{"simulationLength":0,"neurons":[{"name":"A"}],"io":[]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Semantic(ConfigSemanticError::NonPositiveHorizon(0))
        ));
    }

    #[test]
    fn rejects_empty_population() {
        let json = r#"{"simulationLength":1,"neurons":[],"io":[]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Semantic(ConfigSemanticError::EmptyPopulation)
        ));
    }

    #[test]
    fn rejects_dangling_connection() {
        let json = r#"{"simulationLength":1,"neurons":[{"name":"A","connections":[{"neuron":"Z","sensitivity":1.0}]}],"io":[]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Semantic(ConfigSemanticError::DanglingConnection { .. })
        ));
    }

    #[test]
    fn rejects_empty_io_list() {
        let json = r#"{"simulationLength":1,"neurons":[{"name":"A"}],"io":[]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Semantic(ConfigSemanticError::EmptyIoList)
        ));
    }

    #[test]
    fn rejects_invalid_io_type() {
        let json = r#"{"simulationLength":1,"neurons":[{"name":"A"}],"io":[{"name":"x","type":2,"connections":[{"neuron":"A"}]}]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Semantic(ConfigSemanticError::InvalidIoType(_, 2))
        ));
    }

    #[test]
    fn loads_a_valid_model() {
        let json = r#"{
            "simulationLength": 4,
            "neurons": [
                {"name": "A", "connections": [{"neuron": "A", "sensitivity": 0.5}]}
            ],
            "io": [
                {"name": "stim", "type": 0, "offset": 0, "duration": 2, "amplitude": 1, "connections": [{"neuron": "A"}]}
            ]
        }"#;
        let model = parse(json).unwrap();
        assert_eq!(model.horizon, 4);
        assert_eq!(model.population.len(), 1);
        assert_eq!(model.devices.len(), 1);
    }
}
