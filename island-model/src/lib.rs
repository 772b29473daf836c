//! This crate implements an island model engine: several independent populations ("islands"),
//! each driven by its own optimization algorithm, evolve concurrently and periodically exchange
//! individuals ("migration") according to a communication graph ("topology") and pluggable
//! migration policies.
//!
//! The engine does not implement optimization algorithms or problems itself: they are consumed
//! through [`Algorithm`] and [`Problem`] traits.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
pub mod features;

pub mod archipelago;
pub mod example;
pub mod island;
pub mod migration;
pub mod population;
pub mod prelude;
pub mod topology;
pub mod utils;

use crate::population::Population;
use crate::utils::*;
use serde::{Deserialize, Serialize};

/// Specifies optimization direction of a problem's objectives.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum OptimizationSense {
    /// Lower fitness values are better.
    #[default]
    Minimization,
    /// Higher fitness values are better.
    Maximization,
}

/// Represents an optimization problem: maps a decision vector to fitness and constraint vectors.
pub trait Problem: Send + Sync {
    /// Returns a name of the problem.
    fn name(&self) -> String {
        short_type_name::<Self>().to_string()
    }

    /// Returns dimension of decision vector.
    fn dimension(&self) -> usize;

    /// Returns dimension of fitness vector.
    fn fitness_dimension(&self) -> usize {
        1
    }

    /// Returns total dimension of constraint vector.
    fn constraint_dimension(&self) -> usize {
        0
    }

    /// Returns amount of equality constraints, they come first in constraint vector.
    fn equality_constraint_dimension(&self) -> usize {
        0
    }

    /// Returns tolerance used to check constraint satisfaction.
    fn constraint_tolerance(&self) -> Float {
        0.
    }

    /// Returns lower and upper bounds of decision vector.
    fn bounds(&self) -> (DecisionVector, DecisionVector);

    /// Returns optimization sense.
    fn sense(&self) -> OptimizationSense {
        OptimizationSense::Minimization
    }

    /// Evaluates fitness of decision vector.
    fn fitness(&self, x: &[Float]) -> FitnessVector;

    /// Evaluates constraints of decision vector. A constraint is satisfied when its value is
    /// zero (equality) or non positive (inequality), within the tolerance.
    fn constraints(&self, _x: &[Float]) -> ConstraintVector {
        Vec::default()
    }

    /// Makes a deep copy of the problem.
    fn clone_box(&self) -> Box<dyn Problem>;

    /// Checks whether another problem is the same as this one.
    fn is_same(&self, other: &dyn Problem) -> bool {
        self.name() == other.name()
            && self.dimension() == other.dimension()
            && self.fitness_dimension() == other.fitness_dimension()
            && self.constraint_dimension() == other.constraint_dimension()
            && self.equality_constraint_dimension() == other.equality_constraint_dimension()
            && self.sense() == other.sense()
            && self.bounds() == other.bounds()
    }
}

/// Represents an optimization algorithm: given a population, produces an evolved population
/// bound to the same problem.
pub trait Algorithm: Send + Sync {
    /// Returns a name of the algorithm.
    fn name(&self) -> String {
        short_type_name::<Self>().to_string()
    }

    /// Runs one generation of the algorithm and returns a new population.
    fn evolve(&mut self, population: &Population) -> GenericResult<Population>;

    /// Returns true if algorithm must run to completion on the calling thread.
    fn is_thread_blocking(&self) -> bool {
        false
    }

    /// Makes a copy of the algorithm, if supported.
    fn try_clone(&self) -> GenericResult<Box<dyn Algorithm>> {
        Err(GenericError::not_implemented(format!("cloning of '{}' algorithm", self.name()).as_str()))
    }
}
