use std::error::Error;

use clap::Args;
use tabata_core::timer::timeline;

#[derive(Args)]
pub struct TimelineArgs {
    /// Use the fast debug configuration
    #[arg(long)]
    pub debug: bool,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TimelineArgs) -> Result<(), Box<dyn Error>> {
    let config = super::active_config(args.debug)?;
    let entries = timeline::build(&config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let owner = match entry.work_interval {
            Some(n) => format!("interval {n}"),
            None => "warm-up".to_string(),
        };
        println!(
            "{:>2}. {:<8} {:>3}s  ({owner})",
            entry.sequential_number,
            entry.phase.label(),
            entry.duration
        );
    }
    println!(
        "{} entries, {}s total",
        entries.len(),
        config.total_session_secs()
    );
    Ok(())
}
