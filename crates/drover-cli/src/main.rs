// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod cpu;
mod logging;

use clap::{ArgMatches, Command, arg};
use cpu::CpuClock;
use drover_bnb::{expand::Pruning, result::SolverResult, sequential::SequentialSolver};
use drover_cluster::{
    cluster::{Cluster, DEFAULT_WORKERS},
    error::ClusterError,
};
use drover_model::{
    generate::{DEFAULT_SEED, example_graph, seeded_random_graph},
    graph::Graph,
};
use std::{process::ExitCode, time::Instant};

fn cli() -> Command {
    Command::new("drover")
        .version(clap::crate_version!())
        .about("Solves the traveling salesman problem exactly with a manager and a pool of workers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(solver_args(
            Command::new("example").about("Solves the built-in 4-node example graph"),
        ))
        .subcommand(solver_args(
            Command::new("random")
                .about("Solves a randomly generated graph")
                .arg(
                    arg!(<NODES> "Number of nodes")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    arg!(<POPULATION> "Chance in percent that an edge exists")
                        .value_parser(clap::value_parser!(u8).range(0..=100)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed of the random generator")
                        .default_value("42")
                        .value_parser(clap::value_parser!(u64)),
                ),
        ))
}

fn solver_args(command: Command) -> Command {
    command
        .arg(
            arg!(--workers [WORKERS] "Number of worker threads")
                .default_value("3")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(arg!(--"no-prune" "Explore every branch instead of cutting by the best distance"))
        .arg(arg!(-v --verbose "Log every worker's progress"))
        .arg(arg!(--sequential "Search on the calling thread without workers"))
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Copy)]
struct RunOptions {
    workers: usize,
    pruning: Pruning,
    verbose: bool,
    sequential: bool,
}

impl RunOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            workers: matches
                .get_one::<u64>("workers")
                .map_or(DEFAULT_WORKERS, |&w| w as usize),
            pruning: Pruning::from(!matches.get_flag("no-prune")),
            verbose: matches.get_flag("verbose"),
            sequential: matches.get_flag("sequential"),
        }
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let (graph, options) = match matches.subcommand() {
        Some(("random", sub)) => {
            let nodes = sub.get_one::<u64>("NODES").map_or(1, |&n| n as usize);
            let population = sub.get_one::<u8>("POPULATION").copied().unwrap_or(0);
            let seed = sub.get_one::<u64>("seed").copied().unwrap_or(DEFAULT_SEED);
            (
                seeded_random_graph(nodes, population, seed),
                RunOptions::from_matches(sub),
            )
        }
        Some(("example", sub)) => (example_graph(), RunOptions::from_matches(sub)),
        _ => {
            let _ = cli().print_help();
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init_logger(options.verbose) {
        eprintln!("logger init failed: {e}");
    }

    println!("{}", graph.matrix());

    let start = Instant::now();
    let cpu = CpuClock::start();
    let result = if options.sequential {
        solve_sequential(&graph, options)
    } else {
        solve_cluster(&graph, options)
    };
    let elapsed = start.elapsed();
    let cpu_time = cpu.elapsed();

    match result {
        Ok(SolverResult::Optimal(tour)) => {
            println!("\nBest path:");
            println!("{}", tour);
            println!("\nAlgorithm took {:.3}s", elapsed.as_secs_f64());
            if let Some(cpu_time) = cpu_time {
                println!("CPU time: {:.3}s", cpu_time.as_secs_f64());
            }
            ExitCode::SUCCESS
        }
        Ok(SolverResult::Infeasible) => {
            println!("No solution possible for current graph!");
            ExitCode::from(1)
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(1)
        }
    }
}

fn solve_cluster(graph: &Graph<i64>, options: RunOptions) -> Result<SolverResult<i64>, ClusterError> {
    let outcome = Cluster::builder()
        .with_workers(options.workers)
        .with_pruning(options.pruning)
        .with_verbose(options.verbose)
        .build()?
        .solve(graph)?;

    log::debug!("{}", outcome.manager);
    for report in &outcome.workers {
        log::debug!("{}", report);
    }
    log::debug!("{}", outcome.engine_statistics());
    Ok(outcome.result)
}

fn solve_sequential(
    graph: &Graph<i64>,
    options: RunOptions,
) -> Result<SolverResult<i64>, ClusterError> {
    let outcome = SequentialSolver::new()
        .with_pruning(options.pruning)
        .with_verbose(options.verbose)
        .solve(graph)?;

    log::debug!("{}", outcome.statistics);
    Ok(outcome.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_example_defaults() {
        let matches = cli().try_get_matches_from(["drover", "example"]).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = RunOptions::from_matches(sub);
        assert_eq!(options.workers, DEFAULT_WORKERS);
        assert_eq!(options.pruning, Pruning::Enabled);
        assert!(!options.verbose);
        assert!(!options.sequential);
    }

    #[test]
    fn test_random_flags() {
        let matches = cli()
            .try_get_matches_from([
                "drover",
                "random",
                "9",
                "40",
                "--seed",
                "7",
                "--workers",
                "5",
                "--no-prune",
                "--verbose",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "random");
        assert_eq!(sub.get_one::<u64>("NODES"), Some(&9));
        assert_eq!(sub.get_one::<u8>("POPULATION"), Some(&40));
        assert_eq!(sub.get_one::<u64>("seed"), Some(&7));
        let options = RunOptions::from_matches(sub);
        assert_eq!(options.workers, 5);
        assert_eq!(options.pruning, Pruning::Disabled);
        assert!(options.verbose);
    }

    #[test]
    fn test_random_default_seed() {
        let matches = cli()
            .try_get_matches_from(["drover", "random", "6", "50"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<u64>("seed"), Some(&DEFAULT_SEED));
        assert_eq!(RunOptions::from_matches(sub).workers, DEFAULT_WORKERS);
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(cli().try_get_matches_from(["drover", "random", "5"]).is_err());
        assert!(cli().try_get_matches_from(["drover", "random", "5", "101"]).is_err());
        assert!(cli().try_get_matches_from(["drover", "random", "0", "50"]).is_err());
        assert!(
            cli()
                .try_get_matches_from(["drover", "example", "--workers", "0"])
                .is_err()
        );
    }

    #[test]
    fn test_solvers_agree_on_example() {
        let options = RunOptions {
            workers: 2,
            pruning: Pruning::Enabled,
            verbose: false,
            sequential: false,
        };
        let graph = example_graph();
        let clustered = solve_cluster(&graph, options).unwrap();
        let sequential = solve_sequential(&graph, options).unwrap();
        assert_eq!(clustered.distance(), Some(15));
        assert_eq!(clustered.distance(), sequential.distance());
    }
}
