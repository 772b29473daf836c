use super::*;
use crate::helpers::problems::*;
use crate::helpers::random::{EchoRandom, FakeRandom};

fn create_ratio_search(ratio: Float) -> NoiseSearch {
    NoiseSearch::new(NoiseSearchMode::Relative {
        probability: 1.,
        range: (ratio, ratio + 1.),
        random: Arc::new(EchoRandom::new(true)),
    })
}

#[test]
fn can_create_vector_problem_with_constraints() {
    let problem = create_constrained_problem();

    assert_eq!(problem.name(), "constrained");
    assert_eq!(problem.dimension(), 1);
    assert_eq!(problem.fitness_dimension(), 1);
    assert_eq!(problem.constraint_dimension(), 1);
    assert_eq!(problem.equality_constraint_dimension(), 0);
    assert_eq!(problem.fitness(&[-3.]), vec![3.]);
    assert_eq!(problem.constraints(&[-3.]), vec![-3.]);
    assert_eq!(problem.sense(), OptimizationSense::Minimization);
}

#[test]
fn can_create_unconstrained_vector_problem() {
    let problem = create_sphere_problem(3);

    assert_eq!(problem.constraint_dimension(), 0);
    assert_eq!(problem.constraint_tolerance(), 0.);
    assert!(problem.constraints(&[1., 2., 3.]).is_empty());
    assert_eq!(problem.bounds(), (vec![-10.; 3], vec![10.; 3]));
}

parameterized_test! {can_calculate_benchmark_function, (fitness_fn, input, expected), {
    assert_eq!(fitness_fn(input.as_slice()), vec![expected]);
}}

can_calculate_benchmark_function! {
    case01_sphere_origin: (create_sphere_function(), vec![0., 0.], 0.),
    case02_sphere: (create_sphere_function(), vec![1., -2., 3.], 14.),
    case03_rosenbrock_minimum: (create_rosenbrock_function(), vec![1., 1., 1.], 0.),
    case04_rosenbrock: (create_rosenbrock_function(), vec![0., 0.], 1.),
}

#[test]
fn can_accept_improving_perturbation_with_velocity() {
    let population = create_population(create_sphere_problem(1), vec![vec![4.], vec![-2.]]);
    let mut algorithm = create_ratio_search(0.5);

    let offspring = algorithm.evolve(&population).unwrap();

    let individuals = offspring.individuals();
    assert_eq!(individuals[0].current_x, vec![2.]);
    assert_eq!(individuals[0].current_v, vec![-2.]);
    assert_eq!(individuals[1].current_x, vec![-1.]);
    assert_eq!(individuals[1].current_v, vec![1.]);
    assert_eq!(offspring.champion().map(|champion| champion.f.clone()), Some(vec![1.]));
}

#[test]
fn can_keep_individual_when_perturbation_is_worse() {
    let population = create_population(create_sphere_problem(1), vec![vec![4.]]);
    let mut algorithm = create_ratio_search(2.);

    let offspring = algorithm.evolve(&population).unwrap();

    assert_eq!(offspring.individuals()[0].current_x, vec![4.]);
    assert_eq!(offspring.individuals()[0].current_f, vec![16.]);
}

#[test]
fn can_clamp_perturbation_to_bounds() {
    let population = create_population(create_identity_problem(OptimizationSense::Maximization), vec![vec![60.]]);
    let mut algorithm = create_ratio_search(2.);

    let offspring = algorithm.evolve(&population).unwrap();

    assert_eq!(offspring.individuals()[0].current_x, vec![100.]);
}

parameterized_test! {can_apply_relative_noise_with_probability, (reals, x, expected), {
    let population = create_population(create_sphere_problem(1), vec![vec![x]]);
    let mut algorithm = NoiseSearch::new(NoiseSearchMode::Relative {
        probability: 0.5,
        range: (0., 1.),
        random: Arc::new(FakeRandom::new(vec![], reals)),
    });

    let offspring = algorithm.evolve(&population).unwrap();

    assert_eq!(offspring.individuals()[0].current_x, vec![expected]);
}}

can_apply_relative_noise_with_probability! {
    case01_hit: (vec![0.1, 0.25], 4., 1.),
    case02_miss: (vec![0.9], 4., 4.),
    case03_zero_is_shifted_but_worse: (vec![0.1, 0.5], 0., 0.),
}

#[test]
fn can_keep_population_shape_with_gaussian_noise() {
    let random: Arc<dyn Random> = Arc::new(RepeatableRandom::new(11));
    let population = Population::new(Box::new(create_sphere_problem(4)), 8, random.as_ref()).unwrap();
    let mut algorithm = NoiseSearch::new(NoiseSearchMode::Gaussian { step: 0.05, random });

    let offspring = (0..10).try_fold(population.clone(), |population, _| algorithm.evolve(&population)).unwrap();

    assert_eq!(offspring.size(), 8);
    population.individuals().iter().zip(offspring.individuals().iter()).for_each(|(before, after)| {
        assert!(after.current_f[0] <= before.current_f[0]);
        assert!(after.current_x.iter().all(|x| (-10. ..=10.).contains(x)));
    });
}

#[test]
fn can_clone_noise_search() {
    let algorithm = create_ratio_search(0.5);

    let clone = algorithm.try_clone().unwrap();

    assert_eq!(clone.name(), "Noise search");
    assert!(!clone.is_thread_blocking());
}
