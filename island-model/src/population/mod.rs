//! The population module contains an ordered collection of individuals bound to a single problem.

#[cfg(test)]
#[path = "../../tests/unit/population/population_test.rs"]
mod population_test;

mod dominance;
pub use self::dominance::*;

mod individual;
pub use self::individual::*;

use crate::Problem;
use crate::utils::*;
use std::fmt::{Display, Formatter};

/// An ordered, indexable collection of individuals bound to exclusively owned problem.
/// Keeps track of the best known individual (champion).
pub struct Population {
    problem: Box<dyn Problem>,
    individuals: Vec<Individual>,
    champion: Option<Champion>,
}

impl Population {
    /// Creates an empty population bound to the given problem.
    pub fn empty(problem: Box<dyn Problem>) -> Self {
        Self { problem, individuals: Vec::default(), champion: None }
    }

    /// Creates a population of given size with individuals sampled uniformly within problem bounds.
    pub fn new(problem: Box<dyn Problem>, size: usize, random: &dyn Random) -> GenericResult<Self> {
        let mut population = Self::empty(problem);
        let (lower, upper) = population.problem.bounds();

        if lower.len() != population.problem.dimension() || upper.len() != population.problem.dimension() {
            return Err(GenericError::size_mismatch("problem bounds", population.problem.dimension(), lower.len()));
        }

        if lower.iter().zip(upper.iter()).any(|(lb, ub)| lb > ub) {
            return Err(GenericError::configuration("lower bound is greater than upper bound"));
        }

        for _ in 0..size {
            let x = lower.iter().zip(upper.iter()).map(|(&lb, &ub)| random.uniform_real(lb, ub)).collect();
            let v = lower
                .iter()
                .zip(upper.iter())
                .map(|(&lb, &ub)| {
                    let width = ub - lb;
                    random.uniform_real(-width, width)
                })
                .collect();

            population.push_individual(x, v)?;
        }

        Ok(population)
    }

    /// Returns the problem which population is bound to.
    pub fn problem(&self) -> &dyn Problem {
        self.problem.as_ref()
    }

    /// Returns amount of individuals.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Returns true if population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns all individuals.
    pub fn individuals(&self) -> &[Individual] {
        self.individuals.as_slice()
    }

    /// Returns individual at given position.
    pub fn get_individual(&self, n: usize) -> GenericResult<&Individual> {
        self.individuals.get(n).ok_or_else(|| GenericError::out_of_range("individual", n, self.size()))
    }

    /// Returns the champion, if population has ever had individuals.
    pub fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    /// Evaluates a new individual at given decision vector and appends it.
    pub fn push_back(&mut self, x: DecisionVector) -> GenericResult<()> {
        let v = vec![0.; x.len()];
        self.push_individual(x, v)
    }

    /// Replaces decision vector of the individual at given position and re-evaluates it.
    pub fn set_x(&mut self, n: usize, x: DecisionVector) -> GenericResult<()> {
        self.check_index(n)?;
        let (f, c) = self.evaluate(&x)?;

        let problem = self.problem.as_ref();
        let individual = &mut self.individuals[n];

        if is_better(problem, &f, &c, &individual.best_f, &individual.best_c) {
            individual.best_x = x.clone();
            individual.best_f = f.clone();
            individual.best_c = c.clone();
        }

        individual.current_x = x;
        individual.current_f = f;
        individual.current_c = c;

        self.update_champion(n);

        Ok(())
    }

    /// Replaces velocity vector of the individual at given position and re-evaluates it.
    pub fn set_v(&mut self, n: usize, v: DecisionVector) -> GenericResult<()> {
        self.check_index(n)?;
        self.check_dimension("velocity vector", v.len())?;

        let x = self.individuals[n].current_x.clone();
        self.set_x(n, x)?;
        self.individuals[n].current_v = v;

        Ok(())
    }

    /// Returns index of the best individual, ties are broken by the lowest index.
    pub fn get_best_idx(&self) -> Option<usize> {
        self.ranked_indices().first().copied()
    }

    /// Returns index of the worst individual, ties are broken by the lowest index.
    pub fn get_worst_idx(&self) -> Option<usize> {
        self.reverse_ranked_indices().first().copied()
    }

    /// Returns indices of individuals ordered from the best to the worst.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let levels = self.front_levels();
        let mut indices = (0..self.size()).collect::<Vec<_>>();
        indices.sort_by_key(|&idx| (levels[idx], idx));

        indices
    }

    /// Returns indices of individuals ordered from the worst to the best.
    pub fn reverse_ranked_indices(&self) -> Vec<usize> {
        let levels = self.front_levels();
        let mut indices = (0..self.size()).collect::<Vec<_>>();
        indices.sort_by_key(|&idx| (std::cmp::Reverse(levels[idx]), idx));

        indices
    }

    /// Checks whether individual `a` is strictly better than individual `b`.
    pub fn is_individual_better(&self, a: &Individual, b: &Individual) -> bool {
        is_better(self.problem(), &a.current_f, &a.current_c, &b.current_f, &b.current_c)
    }

    fn front_levels(&self) -> Vec<usize> {
        front_levels(&self.individuals, |a, b| self.is_individual_better(a, b))
    }

    fn push_individual(&mut self, x: DecisionVector, v: DecisionVector) -> GenericResult<()> {
        self.check_dimension("velocity vector", v.len())?;
        let (f, c) = self.evaluate(&x)?;

        self.individuals.push(Individual::new(x, v, f, c));
        self.update_champion(self.individuals.len() - 1);

        Ok(())
    }

    fn evaluate(&self, x: &[Float]) -> GenericResult<(FitnessVector, ConstraintVector)> {
        self.check_dimension("decision vector", x.len())?;

        let f = self.problem.fitness(x);
        if f.len() != self.problem.fitness_dimension() {
            return Err(GenericError::size_mismatch("fitness vector", self.problem.fitness_dimension(), f.len()));
        }

        let c = self.problem.constraints(x);
        if c.len() != self.problem.constraint_dimension() {
            return Err(GenericError::size_mismatch("constraint vector", self.problem.constraint_dimension(), c.len()));
        }

        Ok((f, c))
    }

    fn update_champion(&mut self, n: usize) {
        let individual = &self.individuals[n];

        let is_improved = self.champion.as_ref().is_none_or(|champion| {
            is_better(self.problem.as_ref(), &individual.current_f, &individual.current_c, &champion.f, &champion.c)
        });

        if is_improved {
            self.champion = Some(Champion::from(individual));
        }
    }

    fn check_index(&self, n: usize) -> GenericResult<()> {
        if n < self.size() { Ok(()) } else { Err(GenericError::out_of_range("individual", n, self.size())) }
    }

    fn check_dimension(&self, what: &str, size: usize) -> GenericResult<()> {
        let dimension = self.problem.dimension();
        if size == dimension { Ok(()) } else { Err(GenericError::size_mismatch(what, dimension, size)) }
    }
}

impl Clone for Population {
    fn clone(&self) -> Self {
        Self { problem: self.problem.clone_box(), individuals: self.individuals.clone(), champion: self.champion.clone() }
    }
}

impl PartialEq for Population {
    fn eq(&self, other: &Self) -> bool {
        self.problem.is_same(other.problem()) && self.individuals == other.individuals && self.champion == other.champion
    }
}

impl Display for Population {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem: {} (dimension: {})", self.problem.name(), self.problem.dimension())?;
        writeln!(f, "Population size: {}", self.size())?;

        for (idx, individual) in self.individuals.iter().enumerate() {
            writeln!(f, "Individual #{idx}:")?;
            writeln!(f, "{individual}")?;
        }

        match &self.champion {
            Some(champion) => write!(f, "Champion:\n{champion}"),
            None => write!(f, "No champion yet."),
        }
    }
}
