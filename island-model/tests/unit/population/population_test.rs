use super::*;
use crate::OptimizationSense;
use crate::helpers::problems::*;
use crate::helpers::random::EchoRandom;
use crate::example::VectorProblem;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn can_create_random_population_within_bounds() {
    let random = RepeatableRandom::new(0);

    let population = Population::new(Box::new(create_sphere_problem(3)), 10, &random).unwrap();

    assert_eq!(population.size(), 10);
    assert!(population.champion().is_some());
    population.individuals().iter().for_each(|individual| {
        assert_eq!(individual.current_x.len(), 3);
        assert_eq!(individual.current_v.len(), 3);
        assert!(individual.current_x.iter().all(|x| (-10. ..=10.).contains(x)));
        assert_eq!(individual.current_x, individual.best_x);
    });
}

#[test]
fn can_create_population_with_zero_width_bounds() {
    let problem = crate::example::VectorProblem::new("fixed", vec![1.], vec![1.], std::sync::Arc::new(|x| vec![x[0]]));

    let population = Population::new(Box::new(problem), 2, &EchoRandom::new(false)).unwrap();

    assert_eq!(population.individuals()[0].current_x, vec![1.]);
    assert_eq!(population.individuals()[0].current_v, vec![0.]);
}

#[test]
fn can_reject_invalid_bounds() {
    let problem = crate::example::VectorProblem::new("bad", vec![1.], vec![0.], std::sync::Arc::new(|x| vec![x[0]]));

    let result = Population::new(Box::new(problem), 2, &EchoRandom::new(true));

    assert_eq!(result.err().map(|err| err.kind()), Some(ErrorKind::Configuration));
}

#[test]
fn can_push_back_individual() {
    let mut population = create_identity_population(&[3., 2.]);

    population.push_back(vec![5.]).unwrap();

    assert_eq!(population.size(), 3);
    let individual = population.get_individual(2).unwrap();
    assert_eq!(individual.current_x, vec![5.]);
    assert_eq!(individual.current_f, vec![5.]);
    assert_eq!(individual.current_v, vec![0.]);
}

#[test]
fn can_reject_push_back_with_wrong_dimension() {
    let mut population = create_identity_population(&[1.]);

    let result = population.push_back(vec![1., 2.]);

    assert_eq!(result.unwrap_err().kind(), ErrorKind::SizeMismatch);
    assert_eq!(population.size(), 1);
}

#[test]
fn can_reject_wrong_fitness_dimension() {
    let problem = crate::example::VectorProblem::new("broken", vec![0.], vec![1.], std::sync::Arc::new(|_| vec![]));
    let mut population = Population::empty(Box::new(problem));

    assert_eq!(population.push_back(vec![0.5]).unwrap_err().kind(), ErrorKind::SizeMismatch);
}

parameterized_test! {can_get_best_and_worst_idx, (sense, values, expected_best, expected_worst), {
    let population = create_population(create_identity_problem(sense), values.iter().map(|v| vec![*v]).collect());

    assert_eq!(population.get_best_idx(), expected_best);
    assert_eq!(population.get_worst_idx(), expected_worst);
}}

can_get_best_and_worst_idx! {
    case01_min: (OptimizationSense::Minimization, vec![3., 1., 2.], Some(1), Some(0)),
    case02_max: (OptimizationSense::Maximization, vec![3., 1., 2.], Some(0), Some(1)),
    case03_ties: (OptimizationSense::Minimization, vec![1., 2., 1., 2.], Some(0), Some(1)),
    case04_empty: (OptimizationSense::Minimization, Vec::<Float>::new(), None, None),
}

#[test]
fn can_rank_multi_objective_by_fronts() {
    let population = create_population(
        create_bi_objective_problem(),
        vec![vec![5., 5.], vec![1., 4.], vec![4., 1.], vec![2., 5.]],
    );

    assert_eq!(population.ranked_indices(), vec![1, 2, 3, 0]);
    assert_eq!(population.reverse_ranked_indices(), vec![0, 3, 1, 2]);
}

#[test]
fn can_keep_best_idx_not_worse_than_others() {
    let random = RepeatableRandom::new(1);
    let population = Population::new(Box::new(create_sphere_problem(2)), 20, &random).unwrap();

    let best = &population.individuals()[population.get_best_idx().unwrap()];

    assert!(population.individuals().iter().all(|other| !population.is_individual_better(other, best)));
}

parameterized_test! {can_keep_nan_fitness_away_from_champion, sense, {
    let population = create_population(create_identity_problem(sense), vec![vec![1.], vec![Float::NAN], vec![0.5]]);

    let best_idx = population.get_best_idx().unwrap();

    assert!(!population.individuals()[best_idx].current_f[0].is_nan());
    assert_eq!(population.get_worst_idx(), Some(1));
    assert!(population.champion().is_some_and(|champion| !champion.f[0].is_nan()));
}}

can_keep_nan_fitness_away_from_champion! {
    case01_min: OptimizationSense::Minimization,
    case02_max: OptimizationSense::Maximization,
}

#[test]
fn can_set_x_and_update_best_and_champion() {
    let mut population = create_identity_population(&[5., 3.]);

    population.set_x(0, vec![1.]).unwrap();

    let individual = population.get_individual(0).unwrap();
    assert_eq!(individual.current_f, vec![1.]);
    assert_eq!(individual.best_x, vec![1.]);
    assert_eq!(population.champion().map(|champion| champion.x.clone()), Some(vec![1.]));

    population.set_x(0, vec![10.]).unwrap();

    let individual = population.get_individual(0).unwrap();
    assert_eq!(individual.current_x, vec![10.]);
    assert_eq!(individual.best_x, vec![1.]);
    assert_eq!(population.champion().map(|champion| champion.f.clone()), Some(vec![1.]));
}

#[test]
fn can_set_v_and_re_evaluate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let fitness_calls = calls.clone();
    // NOTE fitness improves with every evaluation
    let problem = VectorProblem::new(
        "drifting",
        vec![-100.],
        vec![100.],
        Arc::new(move |x: &[Float]| vec![x[0] - fitness_calls.fetch_add(1, Ordering::SeqCst) as Float]),
    );
    let mut population = create_population(problem, vec![vec![5.]]);

    population.set_v(0, vec![2.]).unwrap();

    let individual = population.get_individual(0).unwrap();
    assert_eq!(individual.current_v, vec![2.]);
    assert_eq!(individual.current_x, vec![5.]);
    assert_eq!(individual.current_f, vec![4.]);
    assert_eq!(individual.best_f, vec![4.]);
    assert_eq!(population.champion().map(|champion| champion.f.clone()), Some(vec![4.]));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(population.set_v(0, vec![]).unwrap_err().kind(), ErrorKind::SizeMismatch);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

parameterized_test! {can_fail_on_out_of_range_index, index, {
    let mut population = create_identity_population(&[1., 2.]);

    assert_eq!(population.get_individual(index).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(population.set_x(index, vec![0.]).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(population.set_v(index, vec![0.]).unwrap_err().kind(), ErrorKind::OutOfRange);
}}

can_fail_on_out_of_range_index! {
    case01_size: 2,
    case02_beyond: 10,
}

#[test]
fn can_clone_population_deeply() {
    let population = create_identity_population(&[1., 2.]);

    let mut copy = population.clone();
    copy.set_x(0, vec![7.]).unwrap();

    assert_eq!(population.get_individual(0).unwrap().current_x, vec![1.]);
    assert!(copy.problem().is_same(population.problem()));
    assert!(copy != population);
    assert!(population.clone() == population);
}

#[test]
fn can_display_population() {
    let population = create_identity_population(&[1.]);

    let text = population.to_string();

    assert!(text.contains("Problem: identity (dimension: 1)"));
    assert!(text.contains("Population size: 1"));
    assert!(text.contains("Champion:"));
}
