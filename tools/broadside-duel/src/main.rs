//! broadside-duel: headless battle runner.
//!
//! Usage:
//!   broadside-duel --ticks 3600
//!   broadside-duel --config battle.json --scenario squadron --seed 7 --player-sails 2

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};

use broadside_core::commands::PlayerCommand;
use broadside_core::enums::{GamePhase, ScenarioId};
use broadside_core::events::GameEvent;
use broadside_core::state::GameStateSnapshot;
use broadside_sim::{SimConfig, SimulationEngine};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "broadside-duel: run a BROADSIDE battle without a display\n\
         \n\
           --config <path>      JSON SimConfig (optional, missing fields use defaults)\n\
           --scenario <name>    duel | squadron (overrides the config)\n\
           --seed <N>           RNG seed (overrides the config)\n\
           --ticks <N>          Maximum ticks to run (default: 3600)\n\
           --player-sails <N>   Sails the player sets at the start (default: 0)\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T> {
    match parse_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{flag} expects a number, got {raw:?}")),
        None => Ok(default),
    }
}

fn parse_scenario(name: &str) -> Result<ScenarioId> {
    match name.to_ascii_lowercase().as_str() {
        "duel" => Ok(ScenarioId::Duel),
        "squadron" => Ok(ScenarioId::Squadron),
        other => bail!("unknown scenario {other:?}"),
    }
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn run(args: &[String]) -> Result<()> {
    let mut config = match parse_value(args, "--config") {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => SimConfig::default(),
    };
    if let Some(name) = parse_value(args, "--scenario") {
        config.scenario = parse_scenario(name)?;
    }
    config.seed = parse_number(args, "--seed", config.seed)?;
    let ticks: u64 = parse_number(args, "--ticks", 3600)?;
    let player_sails: u32 = parse_number(args, "--player-sails", 0)?;

    let mut engine = SimulationEngine::try_new(config).map_err(anyhow::Error::msg)?;
    engine.queue_commands((0..player_sails).map(|_| PlayerCommand::OpenSail));

    let mut last = GameStateSnapshot::default();
    let mut collisions = 0usize;
    let mut sunk = 0usize;
    for _ in 0..ticks {
        last = engine.tick();
        for event in &last.events {
            match event {
                GameEvent::Collision { .. } => collisions += 1,
                GameEvent::ShipDestroyed { .. } => sunk += 1,
                _ => {}
            }
        }
        if matches!(last.phase, GamePhase::Defeat | GamePhase::Victory) {
            break;
        }
    }

    print_summary(&last, collisions, sunk);
    let session = engine.exit_scene();
    log::info!(
        "session carried out: hull {}/{}, crew {}/{}",
        session.current_hull_health,
        session.max_hull_health,
        session.current_crew_health,
        session.max_crew_health
    );
    Ok(())
}

fn print_summary(snapshot: &GameStateSnapshot, collisions: usize, sunk: usize) {
    println!(
        "{:?} after {} ticks ({:.1}s)",
        snapshot.phase, snapshot.time.tick, snapshot.time.elapsed_secs
    );
    println!("collisions: {collisions}, enemy ships sunk: {sunk}");
    for ship in &snapshot.ships {
        println!(
            "  ship {:>2} {:?} pos ({:>7.2}, {:>7.2}) rot {:>6.1} speed {:.2} hull {:>5.1} crew {:>5.1}",
            ship.id.0,
            ship.team,
            ship.position.x,
            ship.position.y,
            ship.rotation,
            ship.speed,
            ship.hull_health,
            ship.crew_health
        );
    }
}
