#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Random, ThreadPool};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A logger type which is called with various information regarding the work done by the engine.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// A cooperative interruption flag: once requested, evolution stops at the next generation boundary.
#[derive(Clone, Default)]
pub struct Interruption {
    flag: Arc<AtomicBool>,
}

impl Interruption {
    /// Requests interruption.
    pub fn request(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clears interruption request.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }

    /// Returns true if interruption was requested.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Specifies parallelism settings: a shared thread pool used to run islands.
#[derive(Clone)]
pub struct Parallelism {
    thread_pool: Arc<ThreadPool>,
}

impl Parallelism {
    /// Creates a new instance of `Parallelism` with given amount of worker threads.
    pub fn new(num_threads: usize) -> Self {
        Self { thread_pool: Arc::new(ThreadPool::new(num_threads)) }
    }

    /// Returns amount of available worker threads.
    pub fn available_threads(&self) -> usize {
        self.thread_pool.num_threads()
    }

    /// Returns the thread pool.
    pub fn thread_pool(&self) -> &ThreadPool {
        self.thread_pool.as_ref()
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(get_cpus())
    }
}

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,

    /// Specifies whether lifecycle events are logged.
    pub is_verbose: bool,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(random: Arc<dyn Random>, parallelism: Parallelism, logger: InfoLogger, is_verbose: bool) -> Self {
        Self { random, parallelism, logger, is_verbose }
    }

    /// Creates an instance of `Environment` which never logs.
    pub fn new_silent(random: Arc<dyn Random>, parallelism: Parallelism) -> Self {
        Self::new(random, parallelism, Arc::new(|_| {}), false)
    }

    /// Logs the message if verbose mode is on.
    pub fn log(&self, message: &str) {
        if self.is_verbose {
            (self.logger)(message)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(
            Arc::new(DefaultRandom::default()),
            Parallelism::default(),
            Arc::new(|msg| println!("{msg}")),
            false,
        )
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
