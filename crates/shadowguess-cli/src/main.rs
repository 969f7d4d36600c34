use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shadowguess-cli", version, about = "Shadowguess CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a guessing session
    Play {
        /// Seed for the question order (reproducible sessions)
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many questions
        #[arg(long)]
        rounds: Option<usize>,
    },
    /// Per-subject guess accuracy
    Results {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Badge tier boundaries
    Badges {
        /// Target maximum streak (default: catalog size)
        #[arg(long)]
        max: Option<f64>,
        /// Number of badge tiers (default: from config)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play { seed, rounds } => commands::play::run(seed, rounds),
        Commands::Results { json } => commands::results::run(json),
        Commands::Badges { max, count } => commands::badges::run(max, count),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
