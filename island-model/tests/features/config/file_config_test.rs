use crate::archipelago::*;
use crate::example::*;
use crate::helpers::problems::create_sphere_problem;
use crate::utils::{Float, RepeatableRandom};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

#[test]
fn can_solve_sphere_with_archipelago_from_config_file() {
    let reader = BufReader::new(File::open("tests/data/archipelago.json").unwrap());
    let algorithm =
        NoiseSearch::new(NoiseSearchMode::Gaussian { step: 0.05, random: Arc::new(RepeatableRandom::new(42)) });

    let mut archipelago = create_builder_from_config_file(Box::new(create_sphere_problem(3)), Box::new(algorithm), reader)
        .and_then(|builder| builder.build())
        .unwrap();
    let initial_best = best_fitness(&mut archipelago);

    archipelago.evolve(20).unwrap();
    archipelago.join().unwrap();

    assert_eq!(archipelago.size(), 4);
    assert!(best_fitness(&mut archipelago) <= initial_best);
    assert_eq!(archipelago.dump_migr_history().unwrap().len(), 20 * 8);
}

fn best_fitness(archipelago: &mut Archipelago) -> Float {
    (0..archipelago.size())
        .filter_map(|idx| archipelago.get_island_mut(idx).ok()?.get_population().ok())
        .filter_map(|population| population.champion().map(|champion| champion.f[0]))
        .fold(Float::MAX, Float::min)
}
