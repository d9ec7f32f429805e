use std::error::Error;

use clap::Args;
use tabata_core::ExerciseRotation;

#[derive(Args)]
pub struct ExercisesArgs {
    /// Use the fast debug configuration
    #[arg(long)]
    pub debug: bool,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
    /// Seed the rotation for a reproducible assignment
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: ExercisesArgs) -> Result<(), Box<dyn Error>> {
    let config = super::active_config(args.debug)?;
    let mut rotation = ExerciseRotation::default();
    let assignment = match args.seed {
        Some(seed) => rotation.get_or_create_seeded(&config, seed),
        None => rotation.get_or_create(&config),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(assignment)?);
        return Ok(());
    }

    for (i, exercise) in assignment.iter().enumerate() {
        println!("{:>2}. {exercise}", i + 1);
    }
    Ok(())
}
