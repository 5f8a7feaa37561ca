use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mastery_cli::commands::{
    batch::{self, BatchArgs},
    compose::{self, ComposeArgs},
    config::{self, ConfigArgs},
    pathway::{self, FinalArgs, IncorrectArgs, PathwayArgs},
    propagate::{self, PropagateArgs},
    step::{self, StepArgs},
};
use mastery_cli::load_config;
use mastery_core::MasteryError;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mastery", version, about = "Adaptive assessment tooling")]
struct Cli {
    /// YAML engine configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enables debug logging unless RUST_LOG is set.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Splits detected concepts into valid and isolated sets.
    Propagate(PropagateArgs),
    /// Phrases follow-up prompts for a list of concepts.
    Compose(ComposeArgs),
    /// Classifies an ordered option submission against candidate pathways.
    Pathway(PathwayArgs),
    /// Checks which incorrect options were identified.
    Incorrect(IncorrectArgs),
    /// Scores the corrected pathway.
    Final(FinalArgs),
    /// Checks one solve step and updates the attempt aggregate.
    Step(StepArgs),
    /// Assesses many explanations in parallel.
    Batch(BatchArgs),
    /// Prints the effective configuration.
    Config(ConfigArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = run(&cli);
    if let Err(err) = &result {
        match err.downcast_ref::<MasteryError>() {
            Some(mastery) => error!(family = mastery.family(), code = mastery.code(), "{err}"),
            None => error!("{err}"),
        }
    }
    result
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let engine = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Propagate(args) => propagate::run(args, &engine).map(drop),
        Command::Compose(args) => compose::run(args, &engine).map(drop),
        Command::Pathway(args) => pathway::run(args).map(drop),
        Command::Incorrect(args) => pathway::run_incorrect(args).map(drop),
        Command::Final(args) => pathway::run_final(args).map(drop),
        Command::Step(args) => step::run(args, &engine).map(drop),
        Command::Batch(args) => batch::run(args, &engine).map(drop),
        Command::Config(args) => config::run(args, &engine).map(drop),
    }
}
