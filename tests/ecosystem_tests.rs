#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_maze::simulation::arena::Arena;
use evo_maze::simulation::ecosystem::{Ecosystem, Phase};
use evo_maze::simulation::error::{ConfigError, SimulationError};
use evo_maze::simulation::geometric_utils::point_distance;
use evo_maze::simulation::levels;
use evo_maze::simulation::params::Params;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_params() -> Params {
    Params {
        population_size: 20,
        chain_length: 400,
        mutation_rate: 0.1,
        crossover_rate: 0.7,
        max_generations: 5,
        individual_size: 5.0,
        alive_bonus: false,
    }
}

/// Level 1 bounds and goal with a single-move generation.
fn unreachable_goal_arena() -> Arena {
    let level = levels::level(1).unwrap();
    Arena::new(level.width, level.height, level.goal, vec![], 1).unwrap()
}

fn scenario_params(alive_bonus: bool) -> Params {
    Params {
        population_size: 2,
        chain_length: 4,
        alive_bonus,
        ..create_test_params()
    }
}

#[test]
fn test_ecosystem_creation() {
    let params = create_test_params();
    let arena = levels::level(2).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let ecosystem = Ecosystem::new(params.clone(), arena.clone(), &mut rng).unwrap();

    assert_eq!(ecosystem.population().len(), params.population_size);
    assert_eq!(ecosystem.phase(), Phase::Running { tick: 0 });
    assert_eq!(ecosystem.generation(), 1);
    assert!(ecosystem.history().is_empty());

    for individual in ecosystem.population().individuals() {
        assert!(individual.is_alive());
        assert_eq!(individual.pos(), &arena.start_position());
        assert_eq!(individual.genes().len(), params.chain_length);
    }
}

#[test]
fn test_creation_rejects_bad_configuration() {
    let arena = levels::level(1).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    let odd = Params {
        population_size: 3,
        ..create_test_params()
    };
    assert!(matches!(
        Ecosystem::new(odd, arena.clone(), &mut rng),
        Err(ConfigError::OddPopulation(3))
    ));

    let empty = Params {
        population_size: 0,
        ..create_test_params()
    };
    assert!(matches!(
        Ecosystem::new(empty, arena.clone(), &mut rng),
        Err(ConfigError::EmptyPopulation)
    ));

    let no_genes = Params {
        chain_length: 0,
        ..create_test_params()
    };
    assert!(matches!(
        Ecosystem::new(no_genes, arena.clone(), &mut rng),
        Err(ConfigError::EmptyGeneChain)
    ));

    let mut no_moves = arena;
    no_moves.move_limit = 0;
    assert!(matches!(
        Ecosystem::new(create_test_params(), no_moves, &mut rng),
        Err(ConfigError::ZeroMoveLimit)
    ));
}

#[test]
fn test_unreachable_goal_scenario() {
    let arena = unreachable_goal_arena();
    let width = f64::from(arena.width);
    let goal = arena.goal_center();
    let mut rng = StdRng::seed_from_u64(3);
    let mut ecosystem = Ecosystem::new(scenario_params(false), arena, &mut rng).unwrap();

    assert!(!ecosystem.tick().unwrap().terminated);
    let result = ecosystem.tick().unwrap();
    assert!(result.terminated);
    assert_eq!(result.tick, 2);
    assert_eq!(result.running, 0);

    let expected: f64 = ecosystem
        .population()
        .individuals()
        .iter()
        .map(|individual| {
            assert!(!individual.is_alive());
            assert!(!individual.won());
            1.0 - f64::from(point_distance(individual.pos(), goal)) / width
        })
        .sum::<f64>()
        / 2.0;

    let stats = ecosystem.evaluate_and_evolve(&mut rng).unwrap();

    assert_eq!(stats.generation, 1);
    assert_eq!(stats.winners, 0);
    assert_eq!(stats.ticks, 2);
    assert!((stats.avg_fitness - expected).abs() < 1e-9);
    assert_eq!(ecosystem.population().len(), 2);
}

#[test]
fn test_alive_bonus_is_configurable() {
    let plain = {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ecosystem =
            Ecosystem::new(scenario_params(false), unreachable_goal_arena(), &mut rng).unwrap();
        ecosystem.run_generation(&mut rng).unwrap()
    };
    let boosted = {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ecosystem =
            Ecosystem::new(scenario_params(true), unreachable_goal_arena(), &mut rng).unwrap();
        ecosystem.run_generation(&mut rng).unwrap()
    };

    assert!((boosted.avg_fitness - plain.avg_fitness * 1.5).abs() < 1e-9);
}

#[test]
fn test_ticking_terminated_generation_is_stable() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut ecosystem =
        Ecosystem::new(scenario_params(false), unreachable_goal_arena(), &mut rng).unwrap();

    while !ecosystem.tick().unwrap().terminated {}
    let positions: Vec<_> = ecosystem
        .population()
        .individuals()
        .iter()
        .map(|i| i.pos().clone())
        .collect();

    let again = ecosystem.tick().unwrap();
    assert!(again.terminated);
    assert_eq!(ecosystem.phase(), Phase::Evaluating { ticks: 2 });
    for (individual, pos) in ecosystem.population().individuals().iter().zip(&positions) {
        assert_eq!(individual.pos(), pos);
    }
}

#[test]
fn test_evaluate_requires_terminated_generation() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut ecosystem =
        Ecosystem::new(create_test_params(), levels::level(1).unwrap(), &mut rng).unwrap();

    assert_eq!(
        ecosystem.evaluate_and_evolve(&mut rng),
        Err(SimulationError::GenerationRunning(0))
    );

    ecosystem.tick().unwrap();
    assert_eq!(
        ecosystem.evaluate_and_evolve(&mut rng),
        Err(SimulationError::GenerationRunning(1))
    );
}

#[test]
fn test_generation_ends_by_move_limit() {
    let mut rng = StdRng::seed_from_u64(7);
    let arena = levels::level(4).unwrap();
    let move_limit = arena.move_limit;
    let mut ecosystem = Ecosystem::new(create_test_params(), arena, &mut rng).unwrap();

    let stats = ecosystem.run_generation(&mut rng).unwrap();

    assert!(stats.ticks >= 1);
    assert!(stats.ticks <= move_limit + 1);
    assert_eq!(ecosystem.phase(), Phase::Running { tick: 0 });
    assert_eq!(ecosystem.generation(), 2);
}

#[test]
fn test_run_finishes_after_max_generations() {
    let params = Params {
        max_generations: 3,
        ..create_test_params()
    };
    let mut rng = StdRng::seed_from_u64(8);
    let mut ecosystem = Ecosystem::new(params, levels::level(2).unwrap(), &mut rng).unwrap();

    while !ecosystem.is_finished() {
        ecosystem.advance(&mut rng).unwrap();
    }

    let generations: Vec<u32> = ecosystem
        .history()
        .records()
        .iter()
        .map(|r| r.generation)
        .collect();
    assert_eq!(generations, vec![1, 2, 3]);
    assert_eq!(ecosystem.tick(), Err(SimulationError::Finished(3)));
    assert_eq!(
        ecosystem.evaluate_and_evolve(&mut rng),
        Err(SimulationError::Finished(3))
    );
}

#[test]
fn test_average_fitness_can_decrease_without_elitism() {
    let params = Params {
        max_generations: 30,
        ..create_test_params()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let mut ecosystem = Ecosystem::new(params, levels::level(3).unwrap(), &mut rng).unwrap();

    while !ecosystem.is_finished() {
        ecosystem.run_generation(&mut rng).unwrap();
        assert_eq!(ecosystem.population().len(), 20);
    }

    let series = ecosystem.history().avg_fitness_series();
    assert_eq!(series.len(), 30);
    assert!(
        series.windows(2).any(|pair| pair[1] < pair[0]),
        "average fitness never decreased: {series:?}"
    );
}

#[test]
fn test_history_reports_fitness_change() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut ecosystem =
        Ecosystem::new(create_test_params(), levels::level(1).unwrap(), &mut rng).unwrap();

    ecosystem.run_generation(&mut rng).unwrap();
    assert_eq!(ecosystem.history().fitness_change_percent(), None);

    ecosystem.run_generation(&mut rng).unwrap();
    let records = ecosystem.history().records();
    let expected =
        (records[1].avg_fitness - records[0].avg_fitness) / records[0].avg_fitness.abs() * 100.0;
    assert_eq!(ecosystem.history().fitness_change_percent(), Some(expected));

    let best = ecosystem.history().best_generation().unwrap();
    assert!(records.iter().all(|r| r.avg_fitness <= best.avg_fitness));
}
