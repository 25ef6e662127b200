use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use eight_puzzle::puzzle::State;
use eight_puzzle::scramble::{scramble, scramble_with};
use eight_puzzle::search;
use eight_puzzle::server;

#[derive(Parser)]
#[command(name = "eight-puzzle", about = "8-puzzle A* solver and HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        bind: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Solve a comma-separated state (0 is the blank); scrambles one when omitted
    Solve {
        state: Option<String>,
        /// Scramble depth used when no state is given
        #[arg(long, default_value_t = 20)]
        scramble: usize,
        /// Seed the scramble for a reproducible start
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a scrambled, solvable state
    Scramble {
        #[arg(default_value_t = 20)]
        steps: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn scrambled(steps: usize, seed: Option<u64>) -> State {
    match seed {
        Some(seed) => scramble_with(&mut ChaCha8Rng::seed_from_u64(seed), steps),
        None => scramble(steps),
    }
}

fn run_solve(state: Option<String>, steps: usize, seed: Option<u64>) -> Result<()> {
    let start = match state {
        Some(s) => s.parse::<State>()?,
        None => scrambled(steps, seed),
    };
    println!("Start state:\n{}", start);
    if !start.is_solvable() {
        println!("State is not solvable; the search will exhaust every reachable state.");
    }

    let solution = search::solve(start);
    if solution.found {
        println!(
            "Optimal solution: {} moves ({} nodes expanded)",
            solution.cost(),
            solution.expanded
        );
        for (mv, state) in solution.actions.iter().zip(solution.path.iter().skip(1)) {
            println!("{}\n{}", mv, state);
        }
    } else {
        println!(
            "No solution found after expanding {} states",
            solution.expanded
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind, port } => {
            server::serve(SocketAddr::new(bind, port)).await?;
        }
        Command::Solve {
            state,
            scramble: steps,
            seed,
        } => {
            run_solve(state, steps, seed)?;
        }
        Command::Scramble { steps, seed } => {
            let state = scrambled(steps, seed);
            println!("{}", state);
            let flat: Vec<String> = state.tiles().iter().map(u8::to_string).collect();
            println!("{}", flat.join(","));
        }
    }
    Ok(())
}
