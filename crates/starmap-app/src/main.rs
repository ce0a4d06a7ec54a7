//! starmap: run the star map simulation headless for a fixed number of ticks.
//!
//! Usage:
//!   starmap --fleets fleets.json --focus Verdant --ticks 1200 --dump final.json

use std::process;

use anyhow::Result;

use starmap_app::cli;

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{}", cli::usage());
        return Ok(());
    }
    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{}", cli::usage());
            process::exit(2);
        }
    };

    let summary = cli::run_headless(&options)?;
    log::info!(
        "Ran {} ticks: {} skirmishes opened, {} retired ({} faulted), {} torpedoes, {} laser shots",
        summary.ticks,
        summary.spawned,
        summary.retired,
        summary.faulted,
        summary.torpedoes_fired,
        summary.lasers_fired
    );
    log::info!(
        "Final scene: {} live skirmishes, {} worlds with fleets",
        summary.last.skirmishes.len(),
        summary.last.worlds.len()
    );
    Ok(())
}
