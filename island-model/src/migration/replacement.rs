#[cfg(test)]
#[path = "../../tests/unit/migration/replacement_test.rs"]
mod replacement_test;

use super::*;
use rand::prelude::SliceRandom;

/// Replaces the worst individuals of a population with the best immigrants unconditionally.
#[derive(Clone, Debug)]
pub struct WorstReplacement {
    rate: MigrationRate,
}

impl WorstReplacement {
    /// Creates a new instance of `WorstReplacement`.
    pub fn new(rate: MigrationRate) -> Self {
        Self { rate }
    }
}

impl ReplacementPolicy for WorstReplacement {
    fn name(&self) -> String {
        "Worst replacement".to_string()
    }

    fn rate(&self) -> MigrationRate {
        self.rate
    }

    fn replace(
        &self,
        population: &mut Population,
        immigrants: &[Individual],
        _: &dyn Random,
    ) -> GenericResult<usize> {
        let amount = self.rate.amount(population.size()).min(immigrants.len());
        let incoming = rank_immigrants(population, immigrants);
        let worst = population.reverse_ranked_indices();

        incoming.into_iter().zip(worst).take(amount).try_for_each(|(immigrant_idx, target_idx)| {
            reinsert(population, target_idx, &immigrants[immigrant_idx])
        })?;

        Ok(amount)
    }
}

/// Replaces the worst individuals of a population with the best immigrants, but only if
/// the immigrant is strictly better than the individual it replaces.
#[derive(Clone, Debug)]
pub struct FairReplacement {
    rate: MigrationRate,
}

impl FairReplacement {
    /// Creates a new instance of `FairReplacement`.
    pub fn new(rate: MigrationRate) -> Self {
        Self { rate }
    }
}

impl ReplacementPolicy for FairReplacement {
    fn name(&self) -> String {
        "Fair replacement".to_string()
    }

    fn rate(&self) -> MigrationRate {
        self.rate
    }

    fn replace(
        &self,
        population: &mut Population,
        immigrants: &[Individual],
        _: &dyn Random,
    ) -> GenericResult<usize> {
        let amount = self.rate.amount(population.size()).min(immigrants.len());
        let incoming = rank_immigrants(population, immigrants);
        let worst = population.reverse_ranked_indices();

        let pairs = incoming
            .into_iter()
            .zip(worst)
            .take(amount)
            .filter(|&(immigrant_idx, target_idx)| {
                population.is_individual_better(&immigrants[immigrant_idx], &population.individuals()[target_idx])
            })
            .collect::<Vec<_>>();

        pairs.iter().try_for_each(|&(immigrant_idx, target_idx)| {
            reinsert(population, target_idx, &immigrants[immigrant_idx])
        })?;

        Ok(pairs.len())
    }
}

/// Replaces random distinct individuals of a population with immigrants taken in their order.
#[derive(Clone, Debug)]
pub struct RandomReplacement {
    rate: MigrationRate,
}

impl RandomReplacement {
    /// Creates a new instance of `RandomReplacement`.
    pub fn new(rate: MigrationRate) -> Self {
        Self { rate }
    }
}

impl ReplacementPolicy for RandomReplacement {
    fn name(&self) -> String {
        "Random replacement".to_string()
    }

    fn rate(&self) -> MigrationRate {
        self.rate
    }

    fn replace(
        &self,
        population: &mut Population,
        immigrants: &[Individual],
        random: &dyn Random,
    ) -> GenericResult<usize> {
        let amount = self.rate.amount(population.size()).min(immigrants.len());

        let mut targets = (0..population.size()).collect::<Vec<_>>();
        targets.shuffle(&mut random.get_rng());

        immigrants
            .iter()
            .zip(targets)
            .take(amount)
            .try_for_each(|(immigrant, target_idx)| reinsert(population, target_idx, immigrant))?;

        Ok(amount)
    }
}
