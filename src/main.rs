// ===== skyscore/src/main.rs =====
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use skyscore::config::Config;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; explicit CLI flags override its values.
    #[arg(global = true, short, long)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Replay(cmd::replay::ReplayArgs),
    Synth(cmd::synth::SynthArgs),
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // 1. Parse raw matches first, to distinguish user input from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // 2. Extract the CLI-provided config and the subcommand's matches;
    //    flattened flags live on the subcommand, not the root.
    let (mut config, cli_config_ref, sub_matches) = match &cli.command {
        Commands::Replay(args) => (
            args.config.clone(),
            &args.config,
            matches.subcommand_matches("replay").unwrap(),
        ),
        Commands::Synth(args) => (
            args.config.clone(),
            &args.config,
            matches.subcommand_matches("synth").unwrap(),
        ),
    };

    // 3. Resolve config: JSON file as the base, CLI overrides on top.
    if let Some(path) = &cli.config {
        info!("⚖️  Loading config from: {}", path);
        match Config::load_from_file(path) {
            Ok(mut file_config) => {
                file_config.merge_from_cli(cli_config_ref, sub_matches);
                config = file_config;
            }
            Err(e) => {
                error!("❌ {}", e);
                process::exit(1);
            }
        }
    }

    // 4. Execute.
    let outcome = match &cli.command {
        Commands::Replay(args) => cmd::replay::run(args, &config),
        Commands::Synth(args) => cmd::synth::run(args, &config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
