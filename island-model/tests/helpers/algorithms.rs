use crate::Algorithm;
use crate::example::VectorProblem;
use crate::population::Population;
use crate::utils::{GenericError, GenericResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// An algorithm which keeps population as is, counts its calls and optionally sleeps.
#[derive(Clone, Default)]
pub struct CountingAlgorithm {
    counter: Arc<AtomicUsize>,
    delay: Option<Duration>,
    is_blocking: bool,
}

impl CountingAlgorithm {
    pub fn new(delay: Option<Duration>, is_blocking: bool) -> Self {
        Self { counter: Arc::default(), delay, is_blocking }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.counter.clone()
    }

    pub fn generations(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Algorithm for CountingAlgorithm {
    fn name(&self) -> String {
        "Counting".to_string()
    }

    fn evolve(&mut self, population: &Population) -> GenericResult<Population> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        self.counter.fetch_add(1, Ordering::SeqCst);

        Ok(population.clone())
    }

    fn is_thread_blocking(&self) -> bool {
        self.is_blocking
    }

    fn try_clone(&self) -> GenericResult<Box<dyn Algorithm>> {
        Ok(Box::new(Self { counter: Arc::default(), delay: self.delay, is_blocking: self.is_blocking }))
    }
}

/// Keeps track of how many evolve calls run at the same time.
#[derive(Clone, Default)]
pub struct ConcurrencyTracker {
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ConcurrencyTracker {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// An algorithm which sleeps inside evolve and reports the call to a shared tracker.
pub struct TrackingAlgorithm {
    tracker: ConcurrencyTracker,
    delay: Duration,
    is_blocking: bool,
}

impl TrackingAlgorithm {
    pub fn new(tracker: ConcurrencyTracker, delay: Duration, is_blocking: bool) -> Self {
        Self { tracker, delay, is_blocking }
    }
}

impl Algorithm for TrackingAlgorithm {
    fn evolve(&mut self, population: &Population) -> GenericResult<Population> {
        self.tracker.enter();
        std::thread::sleep(self.delay);
        self.tracker.leave();

        Ok(population.clone())
    }

    fn is_thread_blocking(&self) -> bool {
        self.is_blocking
    }
}

/// An algorithm which does not support cloning.
pub struct NonCloneableAlgorithm;

impl Algorithm for NonCloneableAlgorithm {
    fn evolve(&mut self, population: &Population) -> GenericResult<Population> {
        Ok(population.clone())
    }
}

/// An algorithm which returns a population bound to another problem.
pub struct ProblemSwapAlgorithm;

impl Algorithm for ProblemSwapAlgorithm {
    fn evolve(&mut self, population: &Population) -> GenericResult<Population> {
        let dimension = population.problem().dimension();
        let problem = VectorProblem::new("other", vec![0.; dimension], vec![1.; dimension], Arc::new(|_| vec![0.]));

        Ok(Population::empty(Box::new(problem)))
    }
}

/// An algorithm which fails with an error or panics.
pub struct FailingAlgorithm {
    pub is_panic: bool,
}

impl Algorithm for FailingAlgorithm {
    fn evolve(&mut self, _: &Population) -> GenericResult<Population> {
        if self.is_panic {
            panic!("algorithm is broken");
        }

        Err(GenericError::from("algorithm has failed"))
    }
}
