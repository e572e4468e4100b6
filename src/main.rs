use anyhow::{Context, Result};
use clap::Parser;
use evo_maze::simulation::arena::Arena;
use evo_maze::simulation::ecosystem::Ecosystem;
use evo_maze::simulation::history::GenerationStats;
use evo_maze::simulation::levels;
use evo_maze::simulation::params::Params;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

/// Headless runner: evolves a population on one level and reports progress.
#[derive(Debug, Parser)]
#[command(name = "evo-maze", version, about)]
struct Args {
    /// JSON file with genetic algorithm parameters.
    #[arg(long)]
    config: Option<String>,
    /// Built-in level to run (1-5).
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Override the configured number of generations.
    #[arg(long)]
    generations: Option<u32>,
    /// Seed for the random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Write a JSON report of every generation to this path.
    #[arg(long)]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    started_at: String,
    level: u32,
    seed: u64,
    params: &'a Params,
    arena: &'a Arena,
    generations: &'a [GenerationStats],
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)
            .with_context(|| format!("loading parameters from {path}"))?,
        None => Params::default(),
    };
    if let Some(generations) = args.generations {
        params.max_generations = generations;
    }

    let arena = levels::level(args.level).context("selecting level")?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let started_at = chrono::Utc::now();

    info!(
        level = args.level,
        seed,
        population = params.population_size,
        move_limit = arena.move_limit,
        "Starting evolution"
    );

    let mut ecosystem = Ecosystem::new(params, arena, &mut rng).context("building ecosystem")?;

    while !ecosystem.is_finished() {
        let Some(stats) = ecosystem.advance(&mut rng)? else {
            continue;
        };

        info!(
            generation = stats.generation,
            avg_fitness = stats.avg_fitness,
            avg_distance = stats.avg_distance,
            best_fitness = stats.best_fitness,
            winners = stats.winners,
            ticks = stats.ticks,
            "Generation complete"
        );
        if let Some(change) = ecosystem.history().fitness_change_percent() {
            info!("Avg fitness change: {change:.2}%");
        }
    }

    match ecosystem.history().best_generation() {
        Some(best) => info!(
            generation = best.generation,
            avg_fitness = best.avg_fitness,
            "Best generation"
        ),
        None => warn!("Run finished without evaluating a generation"),
    }

    if let Some(path) = &args.output {
        let report = RunReport {
            started_at: started_at.to_rfc3339(),
            level: args.level,
            seed,
            params: ecosystem.params(),
            arena: ecosystem.arena(),
            generations: ecosystem.history().records(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing report to {path}"))?;
        info!(path, "Report written");
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
