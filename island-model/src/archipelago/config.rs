//! Contains an archipelago configuration which can be read from json.

#[cfg(test)]
#[path = "../../tests/unit/archipelago/config_test.rs"]
mod config_test;

use super::*;
use crate::Problem;
use crate::topology::*;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// An archipelago configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ArchipelagoConfig {
    /// Specifies islands.
    pub islands: IslandsConfig,
    /// Specifies topology. Default is unconnected.
    pub topology: Option<TopologyType>,
    /// Specifies migration.
    pub migration: MigrationConfig,
    /// Specifies environment settings.
    pub environment: Option<EnvironmentConfig>,
}

/// Specifies islands created from a problem and an algorithm.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IslandsConfig {
    /// Amount of islands.
    pub amount: usize,
    /// Population size of each island.
    pub population_size: usize,
    /// Migration probability of each island. Default is 1.
    pub migration_probability: Option<Float>,
}

/// Specifies topology type.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum TopologyType {
    /// No connections.
    #[serde(rename(deserialize = "unconnected"))]
    Unconnected,
    /// Bidirectional ring.
    #[serde(rename(deserialize = "ring"))]
    Ring,
    /// Unidirectional ring.
    #[serde(rename(deserialize = "one-way-ring"))]
    OneWayRing,
    /// Every island is connected with every other one.
    #[serde(rename(deserialize = "fully-connected"))]
    FullyConnected,
    /// Explicit list of directed edges.
    #[serde(rename(deserialize = "custom"))]
    Custom {
        /// Edges as (source, destination) pairs.
        edges: Vec<(usize, usize)>,
    },
}

/// Specifies migration settings.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Selection policy.
    pub selection: SelectionType,
    /// Replacement policy.
    pub replacement: ReplacementType,
    /// Distribution type. Default is broadcast.
    pub distribution: Option<DistributionType>,
    /// Migration direction. Default is source.
    pub direction: Option<MigrationDirection>,
}

/// Specifies selection policy.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum SelectionType {
    /// Selects the best individuals.
    #[serde(rename(deserialize = "best"))]
    Best {
        /// Migration rate.
        rate: MigrationRate,
    },
    /// Selects random individuals.
    #[serde(rename(deserialize = "random"))]
    Random {
        /// Migration rate.
        rate: MigrationRate,
    },
}

/// Specifies replacement policy.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ReplacementType {
    /// Replaces the worst individuals.
    #[serde(rename(deserialize = "worst"))]
    Worst {
        /// Migration rate.
        rate: MigrationRate,
    },
    /// Replaces the worst individuals with better immigrants only.
    #[serde(rename(deserialize = "fair"))]
    Fair {
        /// Migration rate.
        rate: MigrationRate,
    },
    /// Replaces random individuals.
    #[serde(rename(deserialize = "random"))]
    Random {
        /// Migration rate.
        rate: MigrationRate,
    },
}

/// Specifies environment settings.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Amount of worker threads. Default is amount of cpus.
    pub threads: Option<usize>,
    /// A seed for repeatable randomness. Default is no seed.
    pub seed: Option<u64>,
    /// Specifies whether lifecycle events are logged. Default is false.
    pub is_verbose: Option<bool>,
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<ArchipelagoConfig> {
    serde_json::from_reader(reader)
        .map_err(|err| GenericError::configuration(format!("cannot deserialize config: '{err}'")))
}

/// Creates an archipelago builder from config file.
pub fn create_builder_from_config_file<R: Read>(
    problem: Box<dyn Problem>,
    algorithm: Box<dyn Algorithm>,
    reader: BufReader<R>,
) -> GenericResult<ArchipelagoBuilder> {
    read_config(reader).and_then(|config| create_builder_from_config(problem, algorithm, &config))
}

/// Creates an archipelago builder from config.
pub fn create_builder_from_config(
    problem: Box<dyn Problem>,
    algorithm: Box<dyn Algorithm>,
    config: &ArchipelagoConfig,
) -> GenericResult<ArchipelagoBuilder> {
    let environment = create_environment(config.environment.as_ref());
    let amount = config.islands.amount;

    let topology: Box<dyn Topology> = match config.topology.as_ref() {
        None | Some(TopologyType::Unconnected) => Box::new(Unconnected::default()),
        Some(TopologyType::Ring) => Box::new(Ring::default()),
        Some(TopologyType::OneWayRing) => Box::new(OneWayRing::default()),
        Some(TopologyType::FullyConnected) => Box::new(FullyConnected::default()),
        Some(TopologyType::Custom { edges }) => Box::new(CustomTopology::with_edges(amount, edges.as_slice())?),
    };

    let selection: Arc<dyn SelectionPolicy> = match config.migration.selection {
        SelectionType::Best { rate } => Arc::new(BestSelection::new(rate)),
        SelectionType::Random { rate } => Arc::new(RandomSelection::new(rate)),
    };

    let replacement: Arc<dyn ReplacementPolicy> = match config.migration.replacement {
        ReplacementType::Worst { rate } => Arc::new(WorstReplacement::new(rate)),
        ReplacementType::Fair { rate } => Arc::new(FairReplacement::new(rate)),
        ReplacementType::Random { rate } => Arc::new(RandomReplacement::new(rate)),
    };

    let mut builder = ArchipelagoBuilder::default()
        .with_environment(environment)
        .with_topology(topology)
        .with_policies(selection, replacement)
        .with_islands(problem, algorithm, amount, config.islands.population_size);

    if let Some(distribution) = config.migration.distribution {
        builder = builder.with_distribution(distribution);
    }

    if let Some(direction) = config.migration.direction {
        builder = builder.with_direction(direction);
    }

    if let Some(probability) = config.islands.migration_probability {
        builder = builder.with_migration_probability(probability);
    }

    Ok(builder)
}

fn create_environment(config: Option<&EnvironmentConfig>) -> Environment {
    let config = config.cloned().unwrap_or_default();

    let random: Arc<dyn Random> = match config.seed {
        Some(seed) => Arc::new(RepeatableRandom::new(seed)),
        None => Arc::new(DefaultRandom::default()),
    };
    let parallelism = config.threads.map(Parallelism::new).unwrap_or_default();

    Environment::new(random, parallelism, Arc::new(|msg| println!("{msg}")), config.is_verbose.unwrap_or(false))
}
