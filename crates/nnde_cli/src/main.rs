mod config;
mod logging;
mod registry;
mod report;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::RunConfig;
use nnde_core::UpdateRule;
use report::RunReport;
use std::path::PathBuf;
use tracing::info;

/// Train a trial-function network on a built-in differential equation.
#[derive(Parser, Debug)]
#[command(name = "nnde", version, about)]
struct Cli {
    /// Problem to solve (see --list)
    #[arg(short, long)]
    problem: Option<String>,
    /// Learning rate
    #[arg(long)]
    eta: Option<f64>,
    /// Number of training epochs
    #[arg(long = "maxepochs", value_name = "INT")]
    max_epochs: Option<usize>,
    /// Hidden units
    #[arg(long = "nhid", value_name = "INT")]
    hidden_units: Option<usize>,
    /// Training points per axis
    #[arg(long, value_name = "INT")]
    ntrain: Option<usize>,
    /// Seed for the parameter initialisation
    #[arg(long)]
    seed: Option<u64>,
    /// Update rule: newton or gradient
    #[arg(long)]
    rule: Option<String>,
    /// JSON file with run settings; flags override its fields
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// List the built-in problems and exit
    #[arg(long)]
    list: bool,
    /// Per-epoch logging
    #[arg(short, long)]
    verbose: bool,
    /// Per-parameter logging
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> Result<RunConfig> {
        let update_rule = self
            .rule
            .as_deref()
            .map(str::parse::<UpdateRule>)
            .transpose()?;
        Ok(RunConfig {
            problem: self.problem.clone(),
            ntrain: self.ntrain,
            eta: self.eta,
            max_epochs: self.max_epochs,
            hidden_units: self.hidden_units,
            seed: self.seed,
            update_rule,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::install_logger(logging::level_for(cli.verbose, cli.debug))
        .context("installing logger")?;

    if cli.list {
        for (name, description) in registry::PROBLEMS {
            println!("{:<18} {}", name, description);
        }
        return Ok(());
    }

    let file = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    let run = file.merge(cli.overrides()?);

    let name = run.problem_name();
    let problem = registry::problem_by_name(name)
        .ok_or_else(|| anyhow!("unknown problem '{}' (try --list)", name))?;
    let settings = run.settings();
    let points = problem
        .training_points(run.ntrain())
        .context("building training points")?;
    info!(
        problem = name,
        order = problem.order(),
        dimension = problem.dimension(),
        ntrain = run.ntrain(),
        "solving"
    );

    let solution = problem
        .solve(&points, &settings)
        .with_context(|| format!("training on problem {}", name))?;
    let report = RunReport {
        problem: name,
        ntrain: run.ntrain(),
        settings,
        comparison: problem.compare(&solution),
        solution: &solution,
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialising result")?
        );
    } else {
        print!("{}", report);
    }
    Ok(())
}
