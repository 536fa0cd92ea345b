/***
# Strategy Comparison

* Runs every built-in planning strategy over the same seeded worlds
* Reports goal rate, average steps and hazards stepped on
* Optionally writes the last episode's stats to a JSON file
***/

use grididdy::{
    builders::SimulationBuilder,
    config::SimulationConfig,
    planner::StrategyKind,
    simulation::EpisodeOutcome,
};
use tracing_subscriber::EnvFilter;

const SEEDS: u64 = 200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let base = match args.next() {
        Some(path) => SimulationConfig::from_json_file(&path)?,
        None => SimulationConfig::default(),
    };
    let stats_path = args.next();

    println!("Strategy Comparison over {} seeds", SEEDS);
    println!("================================\n");
    println!("| Strategy         | Goal | Stuck | Limit | Avg Steps | Avg Dangerous |");
    println!("|------------------|------|-------|-------|-----------|---------------|");

    for kind in StrategyKind::all() {
        let mut reached = 0;
        let mut stuck = 0;
        let mut limited = 0;
        let mut steps = 0;
        let mut dangerous = 0;
        let mut last = None;

        for seed in 0..SEEDS {
            let mut sim = SimulationBuilder::from_config(base.clone())
                .seed(seed)
                .strategy(kind)
                .build()?;
            match sim.run_episode()? {
                EpisodeOutcome::GoalReached => reached += 1,
                EpisodeOutcome::Stuck => stuck += 1,
                EpisodeOutcome::StepLimit => limited += 1,
            }
            steps += sim.stats().steps;
            dangerous += sim.stats().dangerous_moves;
            last = Some(sim.stats().clone());
        }

        println!(
            "| {:16} | {:4} | {:5} | {:5} | {:9.1} | {:13.2} |",
            format!("{:?}", kind),
            reached,
            stuck,
            limited,
            steps as f64 / SEEDS as f64,
            dangerous as f64 / SEEDS as f64
        );

        if let (Some(path), Some(stats)) = (&stats_path, last) {
            stats.save(&format!("{}.{}.json", path, stats.strategy))?;
        }
    }
    Ok(())
}
