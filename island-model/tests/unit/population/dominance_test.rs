use super::*;
use crate::helpers::problems::*;

parameterized_test! {can_compare_single_objective_fitness, (sense, a, b, expected), {
    let problem = create_identity_problem(sense);

    assert_eq!(is_fitness_better(&problem, &[a], &[b]), expected);
}}

can_compare_single_objective_fitness! {
    case01_min_better: (OptimizationSense::Minimization, 1., 2., true),
    case02_min_worse: (OptimizationSense::Minimization, 2., 1., false),
    case03_min_equal: (OptimizationSense::Minimization, 1., 1., false),
    case04_max_better: (OptimizationSense::Maximization, 2., 1., true),
    case05_max_worse: (OptimizationSense::Maximization, 1., 2., false),
    case06_min_nan: (OptimizationSense::Minimization, Float::NAN, 1., false),
    case07_min_against_nan: (OptimizationSense::Minimization, 1., Float::NAN, true),
    case08_max_nan: (OptimizationSense::Maximization, Float::NAN, 1., false),
    case09_max_against_nan: (OptimizationSense::Maximization, 1., Float::NAN, true),
    case10_both_nan: (OptimizationSense::Maximization, Float::NAN, Float::NAN, false),
}

parameterized_test! {can_compare_multi_objective_fitness, (a, b, expected), {
    let problem = create_bi_objective_problem();

    assert_eq!(is_fitness_better(&problem, &a, &b), expected);
}}

can_compare_multi_objective_fitness! {
    case01_dominates: (vec![1., 1.], vec![2., 2.], true),
    case02_dominates_weakly: (vec![1., 2.], vec![2., 2.], true),
    case03_non_dominated: (vec![1., 3.], vec![2., 2.], false),
    case04_equal: (vec![2., 2.], vec![2., 2.], false),
}

parameterized_test! {can_prefer_feasible_solutions, (f1, c1, f2, c2, expected), {
    let problem = create_constrained_problem();

    assert_eq!(is_better(&problem, &[f1], &[c1], &[f2], &[c2]), expected);
}}

can_prefer_feasible_solutions! {
    case01_feasible_vs_infeasible: (10., -1., 1., 1., true),
    case02_infeasible_vs_feasible: (1., 1., 10., -1., false),
    case03_both_feasible: (1., -1., 2., -2., true),
    case04_less_violation: (10., 1., 1., 2., true),
    case05_more_violation: (1., 2., 10., 1., false),
}

#[test]
fn can_check_equality_constraints_with_tolerance() {
    let problem = crate::example::VectorProblem::new(
        "equality",
        vec![0.],
        vec![1.],
        std::sync::Arc::new(|x| vec![x[0]]),
    )
    .with_constraints(std::sync::Arc::new(|x| vec![x[0], x[0]]), 2, 1, 0.1);

    assert!(is_feasible(&problem, &[0.05, -5.]));
    assert!(!is_feasible(&problem, &[-0.2, -5.]));
    assert!(!is_feasible(&problem, &[0., 0.2]));
    assert!((total_violation(&problem, &[-0.2, 0.5]) - 0.7).abs() < 1E-9);
}

#[test]
fn can_assign_front_levels() {
    let items = vec![3, 1, 2, 1];

    let levels = front_levels(&items, |a, b| a < b);

    assert_eq!(levels, vec![2, 0, 1, 0]);
}
