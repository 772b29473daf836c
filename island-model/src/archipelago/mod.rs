//! The archipelago module contains a coordinator of multiple islands: it evolves them in rounds
//! and routes migrants along topology edges after every round.

#[cfg(test)]
#[path = "../../tests/unit/archipelago/archipelago_test.rs"]
mod archipelago_test;

mod builder;
pub use self::builder::*;

mod config;
pub use self::config::*;

mod history;
pub use self::history::*;

use crate::Algorithm;
use crate::island::{Budget, Island};
use crate::migration::*;
use crate::topology::Topology;
use crate::utils::*;
use rand::RngCore;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

struct ArchipelagoCore {
    islands: Vec<Island>,
    topology: Box<dyn Topology>,
    selection: Arc<dyn SelectionPolicy>,
    replacement: Arc<dyn ReplacementPolicy>,
    distribution: DistributionType,
    direction: MigrationDirection,
    history: MigrationHistory,
    rounds: usize,
    timer: Timer,
}

impl ArchipelagoCore {
    fn is_blocking(&self) -> bool {
        self.islands.iter().all(Island::is_thread_blocking)
    }

    fn run(&mut self, budget: Budget, interruption: &Interruption, environment: &Environment) -> GenericResult<usize> {
        let timer = Timer::start();
        let mut completed = 0;

        while !budget.is_exhausted(completed, &timer) && !interruption.is_requested() {
            // NOTE islands and history are kept when user code panics
            catch_unwind(AssertUnwindSafe(|| {
                self.evolve_islands()?;
                self.migrate(environment)
            }))
            .map_err(panic_to_error)??;
            completed += 1;
        }

        Ok(completed)
    }

    fn evolve_islands(&mut self) -> GenericResult<()> {
        let (blocking, concurrent): (Vec<_>, Vec<_>) =
            self.islands.iter_mut().partition(|island| island.is_thread_blocking());

        let evolve_blocking = || blocking.into_iter().map(|island| island.evolve_generation()).collect::<Vec<_>>();

        // NOTE thread blocking islands stay on the current thread
        let results = if concurrent.is_empty() {
            evolve_blocking()
        } else {
            let (blocking_results, concurrent_results) = parallel_join(evolve_blocking, || {
                parallel_into_collect(concurrent, |island| island.evolve_generation())
            });

            blocking_results.into_iter().chain(concurrent_results).collect()
        };

        combine_results(results.into_iter().filter_map(Result::err).collect())
    }

    fn migrate(&mut self, environment: &Environment) -> GenericResult<()> {
        let random = environment.random.as_ref();
        let routes = self.get_routes(random)?;

        if routes.is_empty() {
            self.rounds += 1;
            return Ok(());
        }

        // all emigrants are taken before any population is changed
        let emigrants = self
            .islands
            .iter_mut()
            .map(|island| island.harvest_emigrants_with(random))
            .collect::<GenericResult<Vec<_>>>()?;
        let accepts = self.islands.iter().map(|island| random.is_hit(island.migration_probability())).collect::<Vec<_>>();

        // NOTE every destination draws from its own stream
        let mut seeds = random.get_rng();

        let mut incoming: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        routes.into_iter().filter(|&(_, destination)| accepts[destination]).for_each(|(source, destination)| {
            incoming.entry(destination).or_default().push(source);
        });

        let targets = self
            .islands
            .iter_mut()
            .enumerate()
            .filter_map(|(destination, island)| {
                incoming.remove(&destination).map(|mut sources| {
                    sources.sort_unstable();
                    (destination, island, sources, RepeatableRandom::new(seeds.next_u64()))
                })
            })
            .collect::<Vec<_>>();

        let emigrants = &emigrants;
        let results = parallel_into_collect(targets, |(destination, island, sources, random)| {
            sources
                .into_iter()
                .map(|source| {
                    island.accept_immigrants_with(&emigrants[source], &random).map(|count| (source, destination, count))
                })
                .collect::<GenericResult<Vec<_>>>()
        });

        let mut errors = Vec::default();
        let mut records = Vec::default();
        results.into_iter().for_each(|result| match result {
            Ok(result) => records.extend(result),
            Err(err) => errors.push(err),
        });
        records.sort_unstable_by_key(|&(source, destination, _)| (source, destination));

        let round = self.rounds;
        for &(source, destination, count) in records.iter() {
            let timestamp = self.timer.elapsed_secs_as_float();
            self.history.push(MigrationEntry { timestamp, round, source, destination, count });
        }
        self.rounds += 1;

        environment.log(&format!(
            "migration round {round}: {} route(s), {} individual(s) inserted",
            records.len(),
            records.iter().map(|(_, _, count)| count).sum::<usize>()
        ));

        combine_results(errors)
    }

    /// Returns migration routes as (source, destination) pairs.
    fn get_routes(&self, random: &dyn Random) -> GenericResult<Vec<(usize, usize)>> {
        let mut routes = Vec::default();

        for vertex in 0..self.islands.len() {
            let adjacent = match self.direction {
                MigrationDirection::Source => self.topology.get_neighbors(vertex)?,
                MigrationDirection::Destination => self.topology.get_inv_neighbors(vertex)?,
            };

            let adjacent = match self.distribution {
                DistributionType::PointToPoint if !adjacent.is_empty() => {
                    vec![adjacent[random.uniform_int(0, adjacent.len() as i32 - 1) as usize]]
                }
                _ => adjacent,
            };

            routes.extend(adjacent.into_iter().map(|other| match self.direction {
                MigrationDirection::Source => (vertex, other),
                MigrationDirection::Destination => (other, vertex),
            }));
        }

        Ok(routes)
    }

    fn try_clone(&mut self) -> GenericResult<Self> {
        Ok(Self {
            islands: self.islands.iter_mut().map(Island::try_clone).collect::<GenericResult<Vec<_>>>()?,
            topology: self.topology.clone_box(),
            selection: self.selection.clone(),
            replacement: self.replacement.clone(),
            distribution: self.distribution,
            direction: self.direction,
            history: self.history.clone(),
            rounds: self.rounds,
            timer: self.timer.clone(),
        })
    }
}

/// An archipelago: a group of islands connected by a topology. Islands are evolved in rounds:
/// every island runs one generation, then migration happens along topology edges.
pub struct Archipelago {
    environment: Environment,
    core: Option<ArchipelagoCore>,
    task: Option<Task<(ArchipelagoCore, GenericResult<usize>)>>,
    interruption: Interruption,
    island_interruptions: Vec<Interruption>,
    size: usize,
}

impl Archipelago {
    /// Creates a new archipelago. Topology must have a vertex per island.
    pub(crate) fn new(
        environment: Environment,
        mut islands: Vec<Island>,
        topology: Box<dyn Topology>,
        selection: Arc<dyn SelectionPolicy>,
        replacement: Arc<dyn ReplacementPolicy>,
        distribution: DistributionType,
        direction: MigrationDirection,
    ) -> GenericResult<Self> {
        if topology.num_vertices() != islands.len() {
            return Err(GenericError::configuration(format!(
                "topology '{}' has {} vertices, but archipelago has {} islands",
                topology.name(),
                topology.num_vertices(),
                islands.len()
            )));
        }

        islands.iter_mut().for_each(|island| island.inherit_policies(&selection, &replacement));

        Ok(Self {
            environment,
            interruption: Interruption::default(),
            island_interruptions: islands.iter().map(Island::interruption).collect(),
            size: islands.len(),
            core: Some(ArchipelagoCore {
                islands,
                topology,
                selection,
                replacement,
                distribution,
                direction,
                history: MigrationHistory::default(),
                rounds: 0,
                timer: Timer::start(),
            }),
            task: None,
        })
    }

    /// Returns amount of islands.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds an island and a new topology vertex for it. Waits for ongoing evolution first.
    pub fn push_back(&mut self, mut island: Island) -> GenericResult<()> {
        let interruption = island.interruption();
        let name = island.name().to_string();

        let core = self.core()?;
        island.inherit_policies(&core.selection, &core.replacement);
        core.islands.push(island);
        core.topology.add_vertex();

        self.island_interruptions.push(interruption);
        self.size += 1;
        self.environment.log(&format!("island '{name}' is added, archipelago size: {}", self.size));

        Ok(())
    }

    /// Replaces the topology. Its vertex count must match the amount of islands.
    pub fn set_topology(&mut self, topology: Box<dyn Topology>) -> GenericResult<()> {
        let core = self.core()?;

        if topology.num_vertices() != core.islands.len() {
            return Err(GenericError::size_mismatch("topology vertices", core.islands.len(), topology.num_vertices()));
        }

        core.topology = topology;

        Ok(())
    }

    /// Replaces algorithm of the island at given position keeping its population.
    pub fn set_algorithm(&mut self, idx: usize, algorithm: Box<dyn Algorithm>) -> GenericResult<()> {
        self.get_island_mut(idx)?.set_algorithm(algorithm)
    }

    /// Returns island at given position. Waits for ongoing evolution first.
    pub fn get_island(&mut self, idx: usize) -> GenericResult<&Island> {
        self.get_island_mut(idx).map(|island| &*island)
    }

    /// Returns mutable island at given position. Waits for ongoing evolution first.
    pub fn get_island_mut(&mut self, idx: usize) -> GenericResult<&mut Island> {
        let core = self.core()?;
        let size = core.islands.len();

        core.islands.get_mut(idx).ok_or_else(|| GenericError::out_of_range("island", idx, size))
    }

    /// Returns topology. Waits for ongoing evolution first.
    pub fn topology(&mut self) -> GenericResult<&dyn Topology> {
        Ok(self.core()?.topology.as_ref())
    }

    /// Runs `n` rounds of evolution and migration. Returns immediately unless every island
    /// is thread blocking.
    pub fn evolve(&mut self, n: usize) -> GenericResult<()> {
        self.start(Budget::Iterations(n))
    }

    /// Runs rounds of evolution and migration till at least given duration has elapsed.
    pub fn evolve_t(&mut self, duration: Duration) -> GenericResult<()> {
        self.start(Budget::Time(duration))
    }

    /// Blocks till evolution of the archipelago and of every island is finished and returns
    /// their errors, if any.
    pub fn join(&mut self) -> GenericResult<()> {
        let mut errors = Vec::default();

        if let Some(task) = self.task.take() {
            let result = task.join().and_then(|(core, result)| {
                self.core = Some(core);
                result
            });

            self.interruption.reset();
            self.island_interruptions.iter().for_each(Interruption::reset);

            match result {
                Ok(rounds) => self.environment.log(&format!("archipelago evolution finished after {rounds} round(s)")),
                Err(err) => {
                    self.environment.log(&format!("archipelago evolution failed: {err}"));
                    errors.push(err);
                }
            }
        }

        // NOTE islands can be evolved separately through mutable access
        if let Some(core) = self.core.as_mut() {
            errors.extend(core.islands.iter_mut().filter_map(|island| island.join().err()));
        }

        combine_results(errors)
    }

    /// Requests interruption of every island and returns immediately. The current round is completed.
    pub fn interrupt(&self) {
        if self.busy() {
            self.environment.log("archipelago interruption requested");
            self.interruption.request();
            self.island_interruptions.iter().for_each(Interruption::request);
        }
    }

    /// Returns true if the archipelago or any of its islands is evolving.
    pub fn busy(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
            || self.core.as_ref().is_some_and(|core| core.islands.iter().any(Island::busy))
    }

    /// Returns true if every island is thread blocking.
    pub fn is_blocking(&self) -> bool {
        self.core.as_ref().is_some_and(ArchipelagoCore::is_blocking)
    }

    /// Returns a copy of migration history. Waits for ongoing evolution first.
    pub fn dump_migr_history(&mut self) -> GenericResult<MigrationHistory> {
        Ok(self.core()?.history.clone())
    }

    /// Removes all migration history entries. Waits for ongoing evolution first.
    pub fn clear_migr_history(&mut self) -> GenericResult<()> {
        self.core()?.history.clear();
        Ok(())
    }

    /// Makes a copy of the archipelago. Fails if any island's algorithm cannot be copied.
    pub fn try_clone(&mut self) -> GenericResult<Archipelago> {
        let core = self.core()?.try_clone()?;

        Ok(Self {
            environment: self.environment.clone(),
            interruption: Interruption::default(),
            island_interruptions: core.islands.iter().map(Island::interruption).collect(),
            size: core.islands.len(),
            core: Some(core),
            task: None,
        })
    }

    fn start(&mut self, budget: Budget) -> GenericResult<()> {
        self.join()?;
        let mut core = self.core.take().ok_or_else(lost_state)?;
        let is_blocking = core.is_blocking();

        self.interruption.reset();
        self.environment.log(&format!(
            "archipelago evolution of {} island(s) started for {budget}{}",
            self.size,
            if is_blocking { " on the calling thread" } else { "" }
        ));

        let interruption = self.interruption.clone();
        let environment = self.environment.clone();
        let run = move || {
            let result = core.run(budget, &interruption, &environment);
            (core, result)
        };

        self.task = Some(if is_blocking {
            Task::ready(run())
        } else {
            Task::spawn(self.environment.parallelism.thread_pool(), run)
        });

        if is_blocking { self.join() } else { Ok(()) }
    }

    fn core(&mut self) -> GenericResult<&mut ArchipelagoCore> {
        self.join()?;
        self.core.as_mut().ok_or_else(lost_state)
    }
}

impl Display for Archipelago {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of islands: {}", self.size)?;

        let Some(core) = self.core.as_ref() else {
            return write!(f, "Archipelago is being evolved.");
        };

        writeln!(f, "Selection policy: {}", core.selection.name())?;
        writeln!(f, "Replacement policy: {}", core.replacement.name())?;
        writeln!(f, "Distribution: {:?}, direction: {:?}", core.distribution, core.direction)?;
        writeln!(f, "{}", core.topology)?;

        core.islands.iter().enumerate().try_for_each(|(idx, island)| writeln!(f, "#{idx}: {island}"))
    }
}

fn combine_results(mut errors: Vec<GenericError>) -> GenericResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.swap_remove(0)),
        _ => Err(GenericError::new(errors[0].kind(), GenericError::join_many(&errors, "; "))),
    }
}

fn lost_state() -> GenericError {
    "archipelago state is lost after failed evolution".into()
}
