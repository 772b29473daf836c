//! Provides fitness comparison logic consistent with a problem's optimization sense.

#[cfg(test)]
#[path = "../../tests/unit/population/dominance_test.rs"]
mod dominance_test;

use crate::utils::*;
use crate::{OptimizationSense, Problem};
use std::cmp::Ordering;

/// Checks whether the constraint vector is feasible for the given problem.
pub fn is_feasible(problem: &dyn Problem, c: &[Float]) -> bool {
    let tolerance = problem.constraint_tolerance();
    let equalities = problem.equality_constraint_dimension();

    c.iter().enumerate().all(|(idx, &value)| if idx < equalities { value.abs() <= tolerance } else { value <= tolerance })
}

/// Returns total constraint violation, zero for feasible vectors.
pub fn total_violation(problem: &dyn Problem, c: &[Float]) -> Float {
    let tolerance = problem.constraint_tolerance();
    let equalities = problem.equality_constraint_dimension();

    c.iter()
        .enumerate()
        .map(|(idx, &value)| {
            let value = if idx < equalities { value.abs() } else { value };
            if value > tolerance { value } else { 0. }
        })
        .sum()
}

/// Returns true if fitness `a` is strictly better than fitness `b`. For multiple objectives,
/// `a` must Pareto dominate `b`.
pub fn is_fitness_better(problem: &dyn Problem, a: &[Float], b: &[Float]) -> bool {
    let mut is_strictly_better = false;

    for (&a, &b) in a.iter().zip(b.iter()) {
        match compare_by_sense(problem.sense(), a, b) {
            Ordering::Greater => return false,
            Ordering::Less => is_strictly_better = true,
            Ordering::Equal => {}
        }
    }

    is_strictly_better
}

/// Returns true if the pair `(f1, c1)` is strictly better than the pair `(f2, c2)`:
/// feasible solutions are better than infeasible ones, infeasible solutions are compared
/// by total violation, feasible by fitness.
pub fn is_better(problem: &dyn Problem, f1: &[Float], c1: &[Float], f2: &[Float], c2: &[Float]) -> bool {
    match (is_feasible(problem, c1), is_feasible(problem, c2)) {
        (true, true) => is_fitness_better(problem, f1, f2),
        (true, false) => true,
        (false, true) => false,
        (false, false) => {
            let (v1, v2) = (total_violation(problem, c1), total_violation(problem, c2));
            compare_by_sense(OptimizationSense::Minimization, v1, v2) == Ordering::Less
        }
    }
}

/// Assigns a front level to every item using non-dominated sorting: level zero contains items
/// which are not dominated by any other item.
pub fn front_levels<T>(items: &[T], is_better: impl Fn(&T, &T) -> bool) -> Vec<usize> {
    let size = items.len();
    let mut dominated_by = vec![Vec::new(); size];
    let mut domination_count = vec![0_usize; size];

    for i in 0..size {
        for j in (i + 1)..size {
            if is_better(&items[i], &items[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if is_better(&items[j], &items[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut levels = vec![0_usize; size];
    let mut front = (0..size).filter(|&idx| domination_count[idx] == 0).collect::<Vec<_>>();
    let mut level = 0;

    while !front.is_empty() {
        let mut next_front = Vec::new();

        for &idx in front.iter() {
            levels[idx] = level;
            for &dominated in dominated_by[idx].iter() {
                domination_count[dominated] -= 1;
                if domination_count[dominated] == 0 {
                    next_front.push(dominated);
                }
            }
        }

        front = next_front;
        level += 1;
    }

    levels
}

/// Compares values so that the better one is less. NaN is the worst value in both senses.
fn compare_by_sense(sense: OptimizationSense, a: Float, b: Float) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => match sense {
            OptimizationSense::Minimization => a.partial_cmp(&b),
            OptimizationSense::Maximization => b.partial_cmp(&a),
        }
        .unwrap_or(Ordering::Equal),
        (is_a_nan, is_b_nan) => is_a_nan.cmp(&is_b_nan),
    }
}
