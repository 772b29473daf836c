//! The migration module contains policies which decide which individuals leave a source
//! population (selection) and which individuals of a destination population are replaced
//! by incoming ones (replacement).

#[cfg(test)]
#[path = "../../tests/unit/migration/rate_test.rs"]
mod rate_test;

use crate::population::{Individual, Population, front_levels};
use crate::utils::*;
use serde::{Deserialize, Serialize};

mod replacement;
pub use self::replacement::*;

mod selection;
pub use self::selection::*;

/// Specifies how many individuals take part in migration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum MigrationRate {
    /// A fixed amount of individuals.
    Absolute(usize),
    /// A fraction of population size in `[0, 1]` range.
    Fractional(Float),
}

impl MigrationRate {
    /// Checks whether the rate is valid.
    pub fn validate(&self) -> GenericResult<()> {
        match self {
            MigrationRate::Fractional(fraction) if !(0. ..=1.).contains(fraction) => {
                Err(GenericError::configuration(format!("fractional migration rate must be in [0, 1], got {fraction}")))
            }
            _ => Ok(()),
        }
    }

    /// Returns amount of individuals for given population size, never exceeds the size.
    pub fn amount(&self, population_size: usize) -> usize {
        match *self {
            MigrationRate::Absolute(amount) => amount.min(population_size),
            MigrationRate::Fractional(fraction) => {
                ((fraction.clamp(0., 1.) * population_size as Float).round() as usize).min(population_size)
            }
        }
    }
}

/// Specifies how emigrants of a source are distributed among its neighbors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionType {
    /// Emigrants are sent to every neighbor.
    #[default]
    Broadcast,
    /// Emigrants are sent to one randomly chosen neighbor.
    PointToPoint,
}

/// Specifies which side of a topology edge initiates migration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MigrationDirection {
    /// Sources push emigrants along outgoing edges.
    #[default]
    Source,
    /// Destinations pull immigrants along incoming edges.
    Destination,
}

/// Chooses which individuals of a source population become emigrants.
pub trait SelectionPolicy: Send + Sync {
    /// Returns a name of the policy.
    fn name(&self) -> String;

    /// Returns migration rate.
    fn rate(&self) -> MigrationRate;

    /// Returns copies of emigrants. The population is never modified. Random decisions are
    /// taken from the given random.
    fn select(&self, population: &Population, random: &dyn Random) -> Vec<Individual>;
}

/// Decides which individuals of a destination population are replaced by immigrants.
pub trait ReplacementPolicy: Send + Sync {
    /// Returns a name of the policy.
    fn name(&self) -> String;

    /// Returns migration rate.
    fn rate(&self) -> MigrationRate;

    /// Merges immigrants into the population and returns amount of actually inserted ones.
    /// Population size is never changed. Random decisions are taken from the given random.
    fn replace(
        &self,
        population: &mut Population,
        immigrants: &[Individual],
        random: &dyn Random,
    ) -> GenericResult<usize>;
}

/// Returns indices of immigrants ordered from the best to the worst according to the
/// destination population problem, ties are broken by the lowest index.
fn rank_immigrants(population: &Population, immigrants: &[Individual]) -> Vec<usize> {
    let levels = front_levels(immigrants, |a, b| population.is_individual_better(a, b));
    let mut indices = (0..immigrants.len()).collect::<Vec<_>>();
    indices.sort_by_key(|&idx| (levels[idx], idx));

    indices
}

/// Overwrites the individual at given position with the immigrant state, re-evaluating it
/// against the population's problem.
fn reinsert(population: &mut Population, idx: usize, immigrant: &Individual) -> GenericResult<()> {
    population.set_x(idx, immigrant.current_x.clone())?;
    population.set_v(idx, immigrant.current_v.clone())
}
