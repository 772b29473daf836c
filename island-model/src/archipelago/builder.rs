#[cfg(test)]
#[path = "../../tests/unit/archipelago/builder_test.rs"]
mod builder_test;

use super::*;
use crate::Problem;
use crate::topology::Unconnected;

enum IslandSource {
    Island(Island),
    Random { problem: Box<dyn Problem>, algorithm: Box<dyn Algorithm>, amount: usize, size: usize },
}

/// Provides configurable way to build an archipelago using fluent interface style.
#[derive(Default)]
pub struct ArchipelagoBuilder {
    environment: Option<Environment>,
    topology: Option<Box<dyn Topology>>,
    selection: Option<Arc<dyn SelectionPolicy>>,
    replacement: Option<Arc<dyn ReplacementPolicy>>,
    distribution: Option<DistributionType>,
    direction: Option<MigrationDirection>,
    migration_probability: Option<Float>,
    islands: Vec<IslandSource>,
}

impl ArchipelagoBuilder {
    /// Sets environment. Default is [`Environment::default`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets topology. An empty topology gets a vertex per island, otherwise its vertex count
    /// must match the amount of islands. Default is unconnected topology.
    pub fn with_topology(mut self, topology: Box<dyn Topology>) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Sets default selection and replacement policies.
    pub fn with_policies(
        mut self,
        selection: Arc<dyn SelectionPolicy>,
        replacement: Arc<dyn ReplacementPolicy>,
    ) -> Self {
        self.selection = Some(selection);
        self.replacement = Some(replacement);
        self
    }

    /// Sets distribution type of emigrants. Default is broadcast.
    pub fn with_distribution(mut self, distribution: DistributionType) -> Self {
        self.distribution = Some(distribution);
        self
    }

    /// Sets migration direction. Default is source.
    pub fn with_direction(mut self, direction: MigrationDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets migration probability of islands created by [`Self::with_islands`]. Default is 1.
    pub fn with_migration_probability(mut self, probability: Float) -> Self {
        self.migration_probability = Some(probability);
        self
    }

    /// Adds `amount` islands with the given algorithm, each with a random population of
    /// `size` individuals. The algorithm has to support cloning when more than one island is added.
    pub fn with_islands(
        mut self,
        problem: Box<dyn Problem>,
        algorithm: Box<dyn Algorithm>,
        amount: usize,
        size: usize,
    ) -> Self {
        self.islands.push(IslandSource::Random { problem, algorithm, amount, size });
        self
    }

    /// Adds a prepared island.
    pub fn with_island(mut self, island: Island) -> Self {
        self.islands.push(IslandSource::Island(island));
        self
    }

    /// Builds the archipelago.
    pub fn build(self) -> GenericResult<Archipelago> {
        let environment = self.environment.unwrap_or_default();

        let selection = self.selection.ok_or_else(|| GenericError::configuration("missing selection policy"))?;
        let replacement = self.replacement.ok_or_else(|| GenericError::configuration("missing replacement policy"))?;
        selection.rate().validate()?;
        replacement.rate().validate()?;
        environment.log(&format!("configured to use policies: '{}', '{}'", selection.name(), replacement.name()));

        let distribution = self.distribution.unwrap_or_default();
        let direction = self.direction.unwrap_or_default();
        environment.log(&format!("configured to use distribution: {distribution:?}, direction: {direction:?}"));

        let islands = self.islands.into_iter().try_fold(Vec::default(), |mut islands, source| {
            match source {
                IslandSource::Island(island) => islands.push(island),
                IslandSource::Random { problem, algorithm, amount, size } => {
                    let offset = islands.len();
                    let mut algorithms = (1..amount).map(|_| algorithm.try_clone()).collect::<GenericResult<Vec<_>>>()?;
                    if amount > 0 {
                        algorithms.push(algorithm);
                    }

                    for (idx, algorithm) in algorithms.into_iter().enumerate() {
                        let mut island = Island::new_random(problem.clone_box(), algorithm, size, environment.clone())?
                            .with_name(format!("Island #{}", offset + idx));
                        if let Some(probability) = self.migration_probability {
                            island = island.with_migration_probability(probability)?;
                        }
                        islands.push(island);
                    }
                }
            }

            Ok::<_, GenericError>(islands)
        })?;

        let mut topology = if let Some(topology) = self.topology {
            environment.log(&format!("configured to use topology: {}", topology.name()));
            topology
        } else {
            environment.log("configured to use default unconnected topology");
            Box::new(Unconnected::default())
        };

        if topology.num_vertices() == 0 {
            (0..islands.len()).for_each(|_| topology.add_vertex());
        }

        Archipelago::new(environment, islands, topology, selection, replacement, distribution, direction)
    }
}
