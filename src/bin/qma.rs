//! Headless QMA simulator.
//!
//! Runs the learning engine for a number of steps and prints the learned
//! schedule of every node plus channel statistics.
//!
//!   cargo run --features cli --bin qma -- --nodes 3 --slots 4 --steps 2000 --seed 7

use clap::Parser;

use qma::{Action, QmaConfig, Simulation, StepResult};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate Q-learning based medium access", long_about = None)]
struct Args {
    /// Number of contending nodes
    #[arg(long, default_value_t = 3)]
    nodes: usize,
    /// Frame length in slots
    #[arg(long, default_value_t = 4)]
    slots: usize,
    /// Learning rate
    #[arg(long, default_value_t = 0.5)]
    alpha: f64,
    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    gamma: f64,
    /// Largest drop of a Q-value in a single update
    #[arg(long, default_value_t = 2.0)]
    xi: f64,
    /// Exploration probability
    #[arg(long, default_value_t = 0.1)]
    rho: f64,
    /// Number of slots to simulate
    #[arg(long, default_value_t = 1000)]
    steps: usize,
    /// Seed for exploration; entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Print every step
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn config(&self) -> QmaConfig {
        QmaConfig {
            nodes: self.nodes,
            slots: self.slots,
            alpha: self.alpha,
            gamma: self.gamma,
            xi: self.xi,
            rho: self.rho,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut sim = match Simulation::seeded(args.config(), seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    log::info!(
        "simulating {} steps ({} nodes, {} slots, seed {})",
        args.steps,
        args.nodes,
        args.slots,
        seed
    );

    for _ in 0..args.steps {
        let step = sim.step_count();
        match sim.step() {
            Ok(result) if args.trace => println!("{:>6} {}", step, describe(&result)),
            Ok(_) => {}
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    println!("Learned schedule:");
    let policy = sim.engine().policy();
    for node in 0..policy.nodes() {
        let row: Vec<String> = policy
            .schedule(node)
            .iter()
            .map(|a| format!("{:<7}", a))
            .collect();
        println!("  node {:>2}: {}", node, row.join(" "));
    }
    println!("{}", sim.metrics());
}

/// One line per step: slot, then `action(reward)` per node, `R` marking exploration.
fn describe(result: &StepResult) -> String {
    let nodes: Vec<String> = result
        .actions
        .iter()
        .zip(&result.rewards)
        .zip(&result.exploring)
        .map(|((action, reward), &exploring)| {
            format!(
                "{}({}){}",
                action,
                reward,
                if exploring { " R" } else { "" }
            )
        })
        .collect();
    let senders = result
        .actions
        .iter()
        .filter(|&&a| a == Action::Send)
        .count();
    format!("slot {} | {} | senders {}", result.slot, nodes.join(", "), senders)
}
