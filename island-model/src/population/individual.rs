use crate::utils::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An individual of a population: its current state and the best state seen so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Current decision vector.
    pub current_x: DecisionVector,
    /// Current velocity vector, algorithm specific.
    pub current_v: DecisionVector,
    /// Current fitness vector.
    pub current_f: FitnessVector,
    /// Current constraint vector.
    pub current_c: ConstraintVector,
    /// Best decision vector seen by this individual.
    pub best_x: DecisionVector,
    /// Best fitness vector seen by this individual.
    pub best_f: FitnessVector,
    /// Best constraint vector seen by this individual.
    pub best_c: ConstraintVector,
}

/// A snapshot of the best individual known within a population.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    /// Decision vector.
    pub x: DecisionVector,
    /// Fitness vector.
    pub f: FitnessVector,
    /// Constraint vector.
    pub c: ConstraintVector,
}

impl Individual {
    pub(crate) fn new(x: DecisionVector, v: DecisionVector, f: FitnessVector, c: ConstraintVector) -> Self {
        Self {
            best_x: x.clone(),
            best_f: f.clone(),
            best_c: c.clone(),
            current_x: x,
            current_v: v,
            current_f: f,
            current_c: c,
        }
    }
}

impl From<&Individual> for Champion {
    fn from(individual: &Individual) -> Self {
        Self { x: individual.current_x.clone(), f: individual.current_f.clone(), c: individual.current_c.clone() }
    }
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\tDecision vector:\t[{}]", format_floats(&self.current_x))?;
        writeln!(f, "\tVelocity vector:\t[{}]", format_floats(&self.current_v))?;
        writeln!(f, "\tFitness vector:\t\t[{}]", format_floats(&self.current_f))?;
        writeln!(f, "\tConstraint vector:\t[{}]", format_floats(&self.current_c))?;
        writeln!(f, "\tBest decision vector:\t[{}]", format_floats(&self.best_x))?;
        writeln!(f, "\tBest fitness vector:\t[{}]", format_floats(&self.best_f))?;
        write!(f, "\tBest constraint vector:\t[{}]", format_floats(&self.best_c))
    }
}

impl Display for Champion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\tDecision vector:\t[{}]", format_floats(&self.x))?;
        writeln!(f, "\tFitness vector:\t\t[{}]", format_floats(&self.f))?;
        write!(f, "\tConstraint vector:\t[{}]", format_floats(&self.c))
    }
}
