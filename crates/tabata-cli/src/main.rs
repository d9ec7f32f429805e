use clap::{Parser, Subcommand};

mod audio;
mod commands;

#[derive(Parser)]
#[command(name = "tabata", version, about = "Tabata interval timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interval session in the foreground
    Run(commands::run::RunArgs),
    /// Print the session timeline
    Timeline(commands::timeline::TimelineArgs),
    /// Print the exercise rotation for a session
    Exercises(commands::exercises::ExercisesArgs),
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Timeline(args) => commands::timeline::run(args),
        Commands::Exercises(args) => commands::exercises::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
