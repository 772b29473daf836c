//! The island module contains a unit of evolution: a population driven by its own algorithm
//! with a controllable lifecycle, either on the calling thread or on a background task.

#[cfg(test)]
#[path = "../../tests/unit/island/island_test.rs"]
mod island_test;

use crate::Algorithm;
use crate::Problem;
use crate::migration::{ReplacementPolicy, SelectionPolicy};
use crate::population::{Individual, Population};
use crate::utils::*;
use std::fmt::{Display, Formatter};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::Duration;

/// Specifies a lifecycle status of an island.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IslandStatus {
    /// No evolution is in progress.
    Idle,
    /// Evolution is in progress.
    Evolving,
    /// Evolution is in progress, but interruption was requested.
    Interrupted,
}

/// Keeps track of evolution statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IslandStatistics {
    /// Amount of completed generations.
    pub generations: usize,
    /// Total time spent inside the algorithm.
    pub evolution_time: Duration,
}

/// Specifies how long evolution lasts.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Budget {
    /// A fixed amount of iterations.
    Iterations(usize),
    /// Whole iterations are started till at least given time has elapsed.
    Time(Duration),
}

impl Budget {
    /// Returns true if no new iteration should be started.
    pub(crate) fn is_exhausted(&self, completed: usize, timer: &Timer) -> bool {
        match self {
            Budget::Iterations(total) => completed >= *total,
            Budget::Time(duration) => timer.is_elapsed(*duration),
        }
    }
}

impl Display for Budget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Budget::Iterations(total) => write!(f, "{total} iteration(s)"),
            Budget::Time(duration) => write!(f, "{}ms", duration.as_millis()),
        }
    }
}

struct IslandCore {
    population: Population,
    algorithm: Box<dyn Algorithm>,
    statistics: IslandStatistics,
}

impl IslandCore {
    fn evolve_generation(&mut self) -> GenericResult<()> {
        let algorithm = &mut self.algorithm;
        let population = &self.population;

        let (offspring, duration) = Timer::measure_duration(|| {
            catch_unwind(AssertUnwindSafe(|| algorithm.evolve(population))).map_err(panic_to_error)?
        });
        let offspring = offspring?;

        if !offspring.problem().is_same(self.population.problem()) {
            return Err(GenericError::configuration(format!(
                "algorithm '{}' has changed the problem from '{}' to '{}'",
                self.algorithm.name(),
                self.population.problem().name(),
                offspring.problem().name()
            )));
        }

        self.population = offspring;
        self.statistics.generations += 1;
        self.statistics.evolution_time += duration;

        Ok(())
    }

    fn run(&mut self, budget: Budget, interruption: &Interruption) -> GenericResult<usize> {
        let timer = Timer::start();
        let mut completed = 0;

        while !budget.is_exhausted(completed, &timer) && !interruption.is_requested() {
            self.evolve_generation()?;
            completed += 1;
        }

        Ok(completed)
    }
}

/// An island: owns one population and one algorithm, evolves them on demand and takes part
/// in migration through its selection and replacement policies.
pub struct Island {
    name: String,
    environment: Environment,
    core: Arc<Mutex<IslandCore>>,
    task: Option<Task<GenericResult<usize>>>,
    interruption: Interruption,
    algorithm_name: String,
    is_blocking: bool,
    selection: Option<Arc<dyn SelectionPolicy>>,
    replacement: Option<Arc<dyn ReplacementPolicy>>,
    migration_probability: Float,
}

impl Island {
    /// Creates a new island from the population and the algorithm.
    pub fn new(population: Population, algorithm: Box<dyn Algorithm>, environment: Environment) -> Self {
        Self {
            name: "Island".to_string(),
            environment,
            algorithm_name: algorithm.name(),
            is_blocking: algorithm.is_thread_blocking(),
            core: Arc::new(Mutex::new(IslandCore { population, algorithm, statistics: IslandStatistics::default() })),
            task: None,
            interruption: Interruption::default(),
            selection: None,
            replacement: None,
            migration_probability: 1.,
        }
    }

    /// Creates a new island with a random population of given size.
    pub fn new_random(
        problem: Box<dyn Problem>,
        algorithm: Box<dyn Algorithm>,
        size: usize,
        environment: Environment,
    ) -> GenericResult<Self> {
        let population = Population::new(problem, size, environment.random.as_ref())?;

        Ok(Self::new(population, algorithm, environment))
    }

    /// Sets island name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets selection policy which overrides the one of archipelago.
    pub fn with_selection(mut self, selection: Arc<dyn SelectionPolicy>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets replacement policy which overrides the one of archipelago.
    pub fn with_replacement(mut self, replacement: Arc<dyn ReplacementPolicy>) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Sets a probability to accept immigrants in a migration round.
    pub fn with_migration_probability(mut self, probability: Float) -> GenericResult<Self> {
        if !(0. ..=1.).contains(&probability) {
            return Err(GenericError::configuration(format!("migration probability must be in [0, 1], got {probability}")));
        }

        self.migration_probability = probability;
        Ok(self)
    }

    /// Returns island name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the name of the algorithm.
    pub fn algorithm_name(&self) -> &str {
        self.algorithm_name.as_str()
    }

    /// Returns a probability to accept immigrants in a migration round.
    pub fn migration_probability(&self) -> Float {
        self.migration_probability
    }

    /// Returns true if evolution must run to completion on the calling thread.
    pub fn is_thread_blocking(&self) -> bool {
        self.is_blocking
    }

    /// Returns current lifecycle status without blocking.
    pub fn status(&self) -> IslandStatus {
        match &self.task {
            Some(task) if !task.is_finished() => {
                if self.interruption.is_requested() {
                    IslandStatus::Interrupted
                } else {
                    IslandStatus::Evolving
                }
            }
            _ => IslandStatus::Idle,
        }
    }

    /// Returns true if evolution is in progress.
    pub fn busy(&self) -> bool {
        self.status() != IslandStatus::Idle
    }

    /// Evolves population for `n` generations. Returns immediately unless the algorithm is
    /// thread blocking.
    pub fn evolve(&mut self, n: usize) -> GenericResult<()> {
        self.start(Budget::Iterations(n))
    }

    /// Evolves population, starting new generations till at least given duration has elapsed.
    pub fn evolve_t(&mut self, duration: Duration) -> GenericResult<()> {
        self.start(Budget::Time(duration))
    }

    /// Blocks till evolution is finished and returns its error, if any. Does nothing on idle island.
    pub fn join(&mut self) -> GenericResult<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        let result = task.join().and_then(|result| result);
        self.interruption.reset();

        match result {
            Ok(generations) => {
                self.environment.log(&format!("{}: evolution finished after {generations} generation(s)", self.name));
                Ok(())
            }
            Err(err) => {
                self.environment.log(&format!("{}: evolution failed: {err}", self.name));
                Err(err)
            }
        }
    }

    /// Requests interruption of ongoing evolution and returns immediately. The current
    /// generation is completed.
    pub fn interrupt(&self) {
        if self.busy() {
            self.environment.log(&format!("{}: interruption requested", self.name));
            self.interruption.request();
        }
    }

    /// Returns a copy of the population. Waits for ongoing evolution first.
    pub fn get_population(&mut self) -> GenericResult<Population> {
        self.join()?;
        Ok(self.lock_core().population.clone())
    }

    /// Replaces the population. Waits for ongoing evolution first.
    pub fn set_population(&mut self, population: Population) -> GenericResult<()> {
        self.join()?;
        self.lock_core().population = population;

        Ok(())
    }

    /// Replaces the algorithm keeping the population. Waits for ongoing evolution first.
    pub fn set_algorithm(&mut self, algorithm: Box<dyn Algorithm>) -> GenericResult<()> {
        self.join()?;

        self.algorithm_name = algorithm.name();
        self.is_blocking = algorithm.is_thread_blocking();
        self.lock_core().algorithm = algorithm;

        Ok(())
    }

    /// Returns evolution statistics. Waits for ongoing evolution first.
    pub fn statistics(&mut self) -> GenericResult<IslandStatistics> {
        self.join()?;
        Ok(self.lock_core().statistics)
    }

    /// Returns copies of individuals chosen by the selection policy, population is not changed.
    pub fn harvest_emigrants(&mut self) -> GenericResult<Vec<Individual>> {
        let random = self.environment.random.clone();
        self.harvest_emigrants_with(random.as_ref())
    }

    /// Merges immigrants into the population using the replacement policy and returns
    /// amount of inserted individuals.
    pub fn accept_immigrants(&mut self, immigrants: &[Individual]) -> GenericResult<usize> {
        let random = self.environment.random.clone();
        self.accept_immigrants_with(immigrants, random.as_ref())
    }

    pub(crate) fn harvest_emigrants_with(&mut self, random: &dyn Random) -> GenericResult<Vec<Individual>> {
        self.join()?;
        let selection = self.selection.clone().ok_or_else(|| missing_policy(self.name(), "selection"))?;

        Ok(selection.select(&self.lock_core().population, random))
    }

    pub(crate) fn accept_immigrants_with(
        &mut self,
        immigrants: &[Individual],
        random: &dyn Random,
    ) -> GenericResult<usize> {
        self.join()?;
        let replacement = self.replacement.clone().ok_or_else(|| missing_policy(self.name(), "replacement"))?;

        replacement.replace(&mut self.lock_core().population, immigrants, random)
    }

    /// Makes a copy of the island. Fails if the algorithm cannot be copied.
    pub fn try_clone(&mut self) -> GenericResult<Island> {
        self.join()?;

        let core = self.lock_core();
        let core = IslandCore {
            population: core.population.clone(),
            algorithm: core.algorithm.try_clone()?,
            statistics: core.statistics,
        };

        Ok(Island {
            name: self.name.clone(),
            environment: self.environment.clone(),
            core: Arc::new(Mutex::new(core)),
            task: None,
            interruption: Interruption::default(),
            algorithm_name: self.algorithm_name.clone(),
            is_blocking: self.is_blocking,
            selection: self.selection.clone(),
            replacement: self.replacement.clone(),
            migration_probability: self.migration_probability,
        })
    }

    /// Sets policies which are not overridden by the island.
    pub(crate) fn inherit_policies(
        &mut self,
        selection: &Arc<dyn SelectionPolicy>,
        replacement: &Arc<dyn ReplacementPolicy>,
    ) {
        if self.selection.is_none() {
            self.selection = Some(selection.clone());
        }

        if self.replacement.is_none() {
            self.replacement = Some(replacement.clone());
        }
    }

    /// Runs exactly one generation on the calling thread ignoring interruption requests.
    pub(crate) fn evolve_generation(&mut self) -> GenericResult<()> {
        self.join()?;
        self.lock_core().evolve_generation()
    }

    /// Returns interruption handle of the island.
    pub(crate) fn interruption(&self) -> Interruption {
        self.interruption.clone()
    }

    fn start(&mut self, budget: Budget) -> GenericResult<()> {
        self.join()?;
        self.interruption.reset();

        self.environment.log(&format!(
            "{}: evolution of '{}' started for {budget}{}",
            self.name,
            self.algorithm_name,
            if self.is_blocking { " on the calling thread" } else { "" }
        ));

        let core = self.core.clone();
        let interruption = self.interruption.clone();
        let run = move || lock_core(&core).run(budget, &interruption);

        self.task = Some(if self.is_blocking {
            Task::ready(run())
        } else {
            Task::spawn(self.environment.parallelism.thread_pool(), run)
        });

        if self.is_blocking { self.join() } else { Ok(()) }
    }

    fn lock_core(&self) -> MutexGuard<'_, IslandCore> {
        lock_core(&self.core)
    }
}

impl Display for Island {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Island name: {}", self.name)?;
        writeln!(f, "Algorithm: {}", self.algorithm_name)?;
        writeln!(f, "Migration probability: {}", self.migration_probability)?;
        writeln!(f, "Selection policy: {}", self.selection.as_ref().map_or("default".to_string(), |s| s.name()))?;
        writeln!(f, "Replacement policy: {}", self.replacement.as_ref().map_or("default".to_string(), |r| r.name()))?;
        writeln!(f, "Status: {:?}", self.status())?;

        match self.core.try_lock() {
            Ok(core) => write!(f, "{}", core.population),
            Err(TryLockError::Poisoned(poisoned)) => write!(f, "{}", poisoned.into_inner().population),
            Err(TryLockError::WouldBlock) => write!(f, "Population is being evolved."),
        }
    }
}

fn lock_core(core: &Mutex<IslandCore>) -> MutexGuard<'_, IslandCore> {
    core.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn missing_policy(island: &str, kind: &str) -> GenericError {
    GenericError::configuration(format!("island '{island}' has no {kind} policy"))
}
