//! Command-line front end: load a roster from JSON, solve it, and print the
//! schedule as a table or as JSON.

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rota::{
    builder,
    render::{render_schedule_table, render_stats_table},
    solver::{
        engine::SolverEngine,
        heuristics::{value::PreferValueHeuristic, variable::RandomVariableHeuristic},
    },
    Roster, ScheduleGrid, SolveOutcome,
};

#[derive(Debug, Parser)]
#[command(name = "rota", about = "Solve a work/rest roster described in a JSON file.")]
struct Args {
    /// Path to the roster JSON file.
    roster: PathBuf,

    /// Print the schedule grid as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Print per-constraint search statistics after solving.
    #[arg(long)]
    stats: bool,

    /// Use a randomized variable order with this seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the roster's time budget, in seconds.
    #[arg(long)]
    budget_secs: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut roster: Roster = serde_json::from_str(&std::fs::read_to_string(&args.roster)?)?;
    if let Some(secs) = args.budget_secs {
        roster.time_budget = Duration::from_secs(secs);
    }

    let engine = match args.seed {
        Some(seed) => SolverEngine::backtracking(
            Box::new(RandomVariableHeuristic::from_seed(seed)),
            Box::new(PreferValueHeuristic(false)),
        ),
        None => SolverEngine::default(),
    };

    let (outcome, stats) = rota::solve_with(&roster, &engine)?;

    if args.stats {
        // Rebuild the (deterministic) model so the stats table can name
        // each constraint.
        let model = builder::build_model(&roster);
        eprintln!("{}", render_stats_table(&stats, &model.constraints));
    }

    match outcome {
        SolveOutcome::Feasible(assignment) => {
            let grid = ScheduleGrid::extract(&roster, &assignment);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_schedule_table(&grid));
            }
            Ok(ExitCode::SUCCESS)
        }
        SolveOutcome::Infeasible => {
            eprintln!("no feasible roster exists for this configuration");
            Ok(ExitCode::FAILURE)
        }
        SolveOutcome::TimedOut => {
            eprintln!(
                "no answer within the {}s budget; a larger --budget-secs may still find one",
                roster.time_budget.as_secs()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
