//! This module reimports commonly used types.

pub use crate::archipelago::{Archipelago, ArchipelagoBuilder, MigrationEntry, MigrationHistory};
pub use crate::island::{Island, IslandStatistics, IslandStatus};
pub use crate::migration::{
    BestSelection, DistributionType, FairReplacement, MigrationDirection, MigrationRate, RandomReplacement,
    RandomSelection, ReplacementPolicy, SelectionPolicy, WorstReplacement,
};
pub use crate::population::{Champion, Individual, Population};
pub use crate::topology::{CustomTopology, FullyConnected, OneWayRing, Ring, Topology, Unconnected};
pub use crate::utils::{
    DefaultRandom, Environment, Float, GenericError, GenericResult, InfoLogger, Parallelism, Random,
    RandomGen, RepeatableRandom,
};
pub use crate::{Algorithm, OptimizationSense, Problem};
