/***
# Grid Explorer

* An agent crosses an 8x8 grid toward a goal it can always locate
* Walls are seen when adjacent; hazards only trip a single "something is
  next to me" sensor bit
* Every tick the belief map is rendered, then the agent replans and moves
* Set RUST_LOG=grididdy=debug to watch the belief updates and planner choices
***/

use grididdy::{
    belief::{AGENT_GLYPH, GOAL_GLYPH},
    builders::SimulationBuilder,
    planner::StrategyKind,
    simulation::{EpisodeOutcome, TickOutcome},
    types::Cell,
    world::WorldState,
    BeliefMap,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PACING: Duration = Duration::from_millis(400);

fn render_ascii(world: &WorldState, beliefs: &BeliefMap) -> String {
    let width = beliefs.width();
    let mut out = String::new();
    out.push_str(&"=".repeat(2 * width));
    out.push('\n');
    for y in 0..beliefs.height() {
        let row: Vec<String> = (0..width)
            .map(|x| {
                let cell = Cell::new(x, y);
                let glyph = if cell == world.agent() {
                    AGENT_GLYPH
                } else if cell == world.goal() {
                    GOAL_GLYPH
                } else {
                    beliefs.status(cell).glyph()
                };
                glyph.to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.push_str(&"=".repeat(2 * width));
    out
}

fn parse_strategy(arg: Option<String>) -> StrategyKind {
    match arg.as_deref() {
        Some("frontier") => StrategyKind::FrontierRanked,
        Some("info") => StrategyKind::InformationGain,
        _ => StrategyKind::RiskWeighted,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let strategy = parse_strategy(args.next());
    let mut builder = SimulationBuilder::new().strategy(strategy);
    if let Some(seed) = args.next().and_then(|s| s.parse().ok()) {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build()?;

    println!("\nStarting Grididdy simulation ({})", sim.strategy_name());
    if let Some(escape) = sim.stats().trapped_escape {
        println!("Start was boxed in, forced through the hazard at {}", escape);
    }
    println!("{}", render_ascii(sim.world(), sim.beliefs()));

    let outcome = sim.run_with(|sim, report| {
        match report.outcome {
            TickOutcome::Moved(_) | TickOutcome::GoalReached => {
                if let Some(step) = &report.diagnostic {
                    println!(
                        "\nMoving to {} - Danger: {:.2}, Distance to Goal: {}",
                        step.next, step.danger, step.distance
                    );
                }
                if report.dangerous {
                    println!("Stepped onto a hidden hazard!");
                }
                println!("{}", render_ascii(sim.world(), sim.beliefs()));
                std::thread::sleep(PACING);
            }
            TickOutcome::Stuck => println!("\nNo safe path found. Agent is stuck."),
        }
    })?;

    let stats = sim.stats();
    match outcome {
        EpisodeOutcome::GoalReached => println!("\nAgent reached the goal!"),
        EpisodeOutcome::Stuck => println!("\nEpisode ended with the agent stuck."),
        EpisodeOutcome::StepLimit => println!("\nStep limit reached."),
    }
    println!(
        "Steps: {}, dangerous moves: {}, distinct cells: {}, confirmed hazards: {}, suspected: {}",
        stats.steps,
        stats.dangerous_moves,
        stats.distinct_cells(),
        stats.confirmed_hazards,
        stats.suspected_hazards
    );
    Ok(())
}
