//! Command-line options and the synchronous headless run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use starmap_core::commands::ViewCommand;
use starmap_core::fleets::{FleetSnapshot, ViewerContext};
use starmap_core::state::SceneSnapshot;
use starmap_sim::{SimConfig, SimulationEngine};

pub const DEFAULT_TICKS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub fleets: Option<PathBuf>,
    pub focus: Option<String>,
    pub ticks: u64,
    pub dump: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            fleets: None,
            focus: None,
            ticks: DEFAULT_TICKS,
            dump: None,
        }
    }
}

pub fn usage() -> &'static str {
    "starmap: headless star map simulation\n\
     \n\
     Usage: starmap [--config FILE] [--fleets FILE] [--focus NAME] [--ticks N] [--dump FILE]\n\
     \n\
       --config <path>  SimConfig JSON (partial files are fine)\n\
       --fleets <path>  Fleet snapshot JSON: faction id -> list of fleets\n\
       --focus <name>   Body to focus before the first tick\n\
       --ticks <N>      Ticks to run (default: 600)\n\
       --dump <path>    Write the final snapshot as JSON\n"
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value()?)),
            "--fleets" => options.fleets = Some(PathBuf::from(value()?)),
            "--focus" => options.focus = Some(value()?),
            "--ticks" => {
                let raw = value()?;
                options.ticks = raw
                    .parse()
                    .with_context(|| format!("--ticks expects a count, got '{raw}'"))?;
            }
            "--dump" => options.dump = Some(PathBuf::from(value()?)),
            other => bail!("Unknown argument: {other}"),
        }
    }
    Ok(options)
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config: {}", path.display()))
}

pub fn load_fleets(path: &Path) -> Result<FleetSnapshot> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read fleets: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse fleets: {}", path.display()))
}

/// Totals reported after a headless run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub spawned: u32,
    pub retired: u32,
    pub faulted: u32,
    pub torpedoes_fired: u32,
    pub lasers_fired: u32,
    pub last: SceneSnapshot,
}

/// Run the engine synchronously as a referee viewer.
pub fn run_headless(options: &Options) -> Result<RunSummary> {
    let config = match &options.config {
        Some(path) => {
            let config = load_config(path)?;
            log::info!("Loaded config from {} (seed {})", path.display(), config.seed);
            config
        }
        None => SimConfig::default(),
    };
    let mut engine = SimulationEngine::new(config);

    if let Some(path) = &options.fleets {
        let fleets = load_fleets(path)?;
        log::info!("Loaded {} fleets from {}", fleets.len(), path.display());
        engine.set_fleet_snapshot(fleets);
    }
    engine.queue_command(ViewCommand::SetViewer {
        viewer: ViewerContext::referee(),
    });
    if let Some(name) = &options.focus {
        engine.bodies().require(name)?;
        engine.queue_command(ViewCommand::FocusBody { name: name.clone() });
    }

    let mut last = SceneSnapshot::default();
    for _ in 0..options.ticks {
        last = engine.tick();
    }

    if let Some(path) = &options.dump {
        let json = serde_json::to_string_pretty(&last).context("serialize snapshot")?;
        fs::write(path, json).with_context(|| format!("write snapshot: {}", path.display()))?;
        log::info!("Wrote final snapshot to {}", path.display());
    }

    let stats = engine.stats();
    Ok(RunSummary {
        ticks: options.ticks,
        spawned: stats.spawned,
        retired: stats.retired,
        faulted: stats.faulted,
        torpedoes_fired: stats.torpedoes_fired,
        lasers_fired: stats.lasers_fired,
        last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("starmap-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), Options::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let options = parse_args(&args(&[
            "--config", "c.json", "--fleets", "f.json", "--focus", "Verdant", "--ticks", "42",
            "--dump", "out.json",
        ]))
        .unwrap();
        assert_eq!(options.config, Some(PathBuf::from("c.json")));
        assert_eq!(options.fleets, Some(PathBuf::from("f.json")));
        assert_eq!(options.focus.as_deref(), Some("Verdant"));
        assert_eq!(options.ticks, 42);
        assert_eq!(options.dump, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--ticks"])).is_err());
        assert!(parse_args(&args(&["--ticks", "many"])).is_err());
        assert!(parse_args(&args(&["--warp"])).is_err());
    }

    #[test]
    fn test_headless_run_with_fleets() {
        let fleets = temp_path("fleets.json");
        let dump = temp_path("dump.json");
        fs::write(
            &fleets,
            r#"{
                "1": [{"id": 1, "faction": 1, "world": "Verdant", "action": "Battle",
                       "vehicles": [{"id": 1, "count": 4}]}],
                "2": [{"id": 2, "faction": 2, "world": "Verdant", "action": "Battle"}]
            }"#,
        )
        .unwrap();

        let summary = run_headless(&Options {
            fleets: Some(fleets.clone()),
            focus: Some("Verdant".to_string()),
            ticks: 300,
            dump: Some(dump.clone()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(summary.spawned, 1);
        assert_eq!(summary.last.skirmishes.len(), 1);
        assert_eq!(summary.last.time.tick, 300);

        let written: SceneSnapshot =
            serde_json::from_str(&fs::read_to_string(&dump).unwrap()).unwrap();
        assert_eq!(written.time.tick, 300);

        let _ = fs::remove_file(fleets);
        let _ = fs::remove_file(dump);
    }

    #[test]
    fn test_headless_rejects_unknown_focus() {
        let err = run_headless(&Options {
            focus: Some("Nowhere".to_string()),
            ticks: 1,
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Nowhere"));
    }

    #[test]
    fn test_headless_run_survives_inverted_zoom_config() {
        let config = temp_path("inverted.json");
        fs::write(
            &config,
            r#"{"camera":{"unfocused_zoom":{"min":2.0,"max":0.5}}}"#,
        )
        .unwrap();
        let summary = run_headless(&Options {
            config: Some(config.clone()),
            ticks: 10,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(summary.last.time.tick, 10);
        let _ = fs::remove_file(config);
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("here.json"));
    }
}
