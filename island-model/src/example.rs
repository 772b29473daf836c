//! This module contains example models and logic to demonstrate practical usage of the crate.

#[cfg(test)]
#[path = "../tests/unit/example_test.rs"]
mod example_test;

use crate::population::{Population, is_better};
use crate::utils::*;
use crate::{Algorithm, OptimizationSense, Problem};
use std::sync::Arc;

/// An objective function which calculates a fitness of a vector.
pub type FitnessFn = Arc<dyn Fn(&[Float]) -> FitnessVector + Send + Sync>;
/// A constraint function which calculates constraint values of a vector.
pub type ConstraintFn = Arc<dyn Fn(&[Float]) -> ConstraintVector + Send + Sync>;

#[derive(Clone)]
struct VectorConstraints {
    constraint_fn: ConstraintFn,
    dimension: usize,
    equality_dimension: usize,
    tolerance: Float,
}

/// An example problem defined by closures over a box bounded vector space.
#[derive(Clone)]
pub struct VectorProblem {
    name: String,
    lower: DecisionVector,
    upper: DecisionVector,
    fitness_fn: FitnessFn,
    fitness_dimension: usize,
    constraints: Option<VectorConstraints>,
    sense: OptimizationSense,
}

impl VectorProblem {
    /// Creates a new single objective minimization problem.
    pub fn new(name: &str, lower: DecisionVector, upper: DecisionVector, fitness_fn: FitnessFn) -> Self {
        Self {
            name: name.to_string(),
            lower,
            upper,
            fitness_fn,
            fitness_dimension: 1,
            constraints: None,
            sense: OptimizationSense::Minimization,
        }
    }

    /// Sets amount of objectives returned by fitness function.
    pub fn with_fitness_dimension(mut self, fitness_dimension: usize) -> Self {
        self.fitness_dimension = fitness_dimension;
        self
    }

    /// Sets optimization sense.
    pub fn with_sense(mut self, sense: OptimizationSense) -> Self {
        self.sense = sense;
        self
    }

    /// Sets constraints: `dimension` values where the first `equality_dimension` ones are equalities.
    pub fn with_constraints(
        mut self,
        constraint_fn: ConstraintFn,
        dimension: usize,
        equality_dimension: usize,
        tolerance: Float,
    ) -> Self {
        self.constraints = Some(VectorConstraints { constraint_fn, dimension, equality_dimension, tolerance });
        self
    }
}

impl Problem for VectorProblem {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn dimension(&self) -> usize {
        self.lower.len()
    }

    fn fitness_dimension(&self) -> usize {
        self.fitness_dimension
    }

    fn constraint_dimension(&self) -> usize {
        self.constraints.as_ref().map_or(0, |constraints| constraints.dimension)
    }

    fn equality_constraint_dimension(&self) -> usize {
        self.constraints.as_ref().map_or(0, |constraints| constraints.equality_dimension)
    }

    fn constraint_tolerance(&self) -> Float {
        self.constraints.as_ref().map_or(0., |constraints| constraints.tolerance)
    }

    fn bounds(&self) -> (DecisionVector, DecisionVector) {
        (self.lower.clone(), self.upper.clone())
    }

    fn sense(&self) -> OptimizationSense {
        self.sense
    }

    fn fitness(&self, x: &[Float]) -> FitnessVector {
        (self.fitness_fn)(x)
    }

    fn constraints(&self, x: &[Float]) -> ConstraintVector {
        self.constraints.as_ref().map_or_else(Vec::default, |constraints| (constraints.constraint_fn)(x))
    }

    fn clone_box(&self) -> Box<dyn Problem> {
        Box::new(self.clone())
    }
}

/// Specifies how a noise search perturbs decision vectors.
#[derive(Clone)]
pub enum NoiseSearchMode {
    /// Multiplies every dimension by a factor sampled from `range` with given probability,
    /// zero values are replaced by the factor itself.
    Relative {
        /// A probability to change a dimension.
        probability: Float,
        /// A range of factors.
        range: (Float, Float),
        /// A random generator.
        random: Arc<dyn Random>,
    },
    /// Adds normally distributed noise with standard deviation as a share of bounds width.
    Gaussian {
        /// A share of bounds width used as standard deviation.
        step: Float,
        /// A random generator.
        random: Arc<dyn Random>,
    },
}

/// A naive search which perturbs every individual once per generation and keeps the
/// perturbation only if it is better.
#[derive(Clone)]
pub struct NoiseSearch {
    mode: NoiseSearchMode,
}

impl NoiseSearch {
    /// Creates a new instance of `NoiseSearch`.
    pub fn new(mode: NoiseSearchMode) -> Self {
        Self { mode }
    }

    fn perturb(&self, x: &[Float], lower: &[Float], upper: &[Float]) -> DecisionVector {
        x.iter()
            .zip(lower.iter().zip(upper.iter()))
            .map(|(&value, (&lb, &ub))| {
                let value = match &self.mode {
                    NoiseSearchMode::Relative { probability, range, random } if random.is_hit(*probability) => {
                        let factor = random.uniform_real(range.0, range.1);
                        if value == 0. { factor } else { value * factor }
                    }
                    NoiseSearchMode::Relative { .. } => value,
                    NoiseSearchMode::Gaussian { step, random } => value + random.normal(0., step * (ub - lb)),
                };

                value.clamp(lb, ub)
            })
            .collect()
    }
}

impl Algorithm for NoiseSearch {
    fn name(&self) -> String {
        "Noise search".to_string()
    }

    fn evolve(&mut self, population: &Population) -> GenericResult<Population> {
        let mut offspring = population.clone();
        let problem = population.problem();
        let (lower, upper) = problem.bounds();

        for (idx, individual) in population.individuals().iter().enumerate() {
            let candidate = self.perturb(&individual.current_x, &lower, &upper);

            let (f, c) = (problem.fitness(&candidate), problem.constraints(&candidate));
            if is_better(problem, &f, &c, &individual.current_f, &individual.current_c) {
                let velocity = candidate.iter().zip(individual.current_x.iter()).map(|(new, old)| new - old).collect();

                offspring.set_x(idx, candidate)?;
                offspring.set_v(idx, velocity)?;
            }
        }

        Ok(offspring)
    }

    fn try_clone(&self) -> GenericResult<Box<dyn Algorithm>> {
        Ok(Box::new(self.clone()))
    }
}

/// Creates multidimensional sphere function: a sum of squares with global minimum at origin.
pub fn create_sphere_function() -> FitnessFn {
    Arc::new(|input| vec![input.iter().map(|x| x * x).sum()])
}

/// Creates multidimensional Rosenbrock function, also referred to as the Valley or Banana function.
pub fn create_rosenbrock_function() -> FitnessFn {
    Arc::new(|input| {
        vec![input.windows(2).fold(0., |acc, pair| {
            let (x1, x2) = (pair[0], pair[1]);
            acc + 100. * (x2 - x1.powi(2)).powi(2) + (x1 - 1.).powi(2)
        })]
    })
}
