#[cfg(test)]
#[path = "../../tests/unit/migration/selection_test.rs"]
mod selection_test;

use super::*;
use rand::prelude::SliceRandom;

/// Selects the best individuals of a population.
#[derive(Clone, Debug)]
pub struct BestSelection {
    rate: MigrationRate,
}

impl BestSelection {
    /// Creates a new instance of `BestSelection`.
    pub fn new(rate: MigrationRate) -> Self {
        Self { rate }
    }
}

impl SelectionPolicy for BestSelection {
    fn name(&self) -> String {
        "Best selection".to_string()
    }

    fn rate(&self) -> MigrationRate {
        self.rate
    }

    fn select(&self, population: &Population, _: &dyn Random) -> Vec<Individual> {
        let amount = self.rate.amount(population.size());

        population
            .ranked_indices()
            .into_iter()
            .take(amount)
            .map(|idx| population.individuals()[idx].clone())
            .collect()
    }
}

/// Selects random distinct individuals of a population.
#[derive(Clone, Debug)]
pub struct RandomSelection {
    rate: MigrationRate,
}

impl RandomSelection {
    /// Creates a new instance of `RandomSelection`.
    pub fn new(rate: MigrationRate) -> Self {
        Self { rate }
    }
}

impl SelectionPolicy for RandomSelection {
    fn name(&self) -> String {
        "Random selection".to_string()
    }

    fn rate(&self) -> MigrationRate {
        self.rate
    }

    fn select(&self, population: &Population, random: &dyn Random) -> Vec<Individual> {
        let amount = self.rate.amount(population.size());

        let mut indices = (0..population.size()).collect::<Vec<_>>();
        indices.shuffle(&mut random.get_rng());

        indices.into_iter().take(amount).map(|idx| population.individuals()[idx].clone()).collect()
    }
}
