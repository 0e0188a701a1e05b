//! skirmish: headless runner for the arena simulation.
//!
//! Usage:
//!   skirmish run --seed 7 --seconds 30 --tuning tuning.json < commands.jsonl
//!   skirmish replay demos/strafe_and_shoot.json --all

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use skirmish_app::game_loop;
use skirmish_app::state::GameLoopCommand;
use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::Tuning;
use skirmish_sim::engine::SimConfig;
use skirmish_sim::replay::{self, InputScript};

const DEFAULT_SECONDS: f64 = 10.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "replay" => cmd_replay(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish: headless arena simulation\n\
         \n\
         Commands:\n\
         \n\
         run       Run the fixed-rate game loop in real time\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --seconds <S>      Wall-clock run length (default: 10)\n\
           --tuning <path>    JSON tuning overrides (optional)\n\
         \n\
           Player commands are read from stdin, one JSON object per line,\n\
           e.g. {{\"type\":\"KeyDown\",\"code\":\"KeyW\"}}. The final snapshot\n\
           is printed to stdout.\n\
         \n\
         replay    Replay a scripted input file deterministically\n\
         \n\
           <script.json>      Input script path\n\
           --all              Print every tick's snapshot as JSON lines\n\
                              (default: final snapshot only)\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Error: invalid value for {flag}: {raw}");
                process::exit(1);
            }
        },
        None => default,
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let seed = parse_flag(args, "--seed", SimConfig::default().seed);
    let seconds = parse_flag(args, "--seconds", DEFAULT_SECONDS);
    let Some(run_for) = game_loop::run_duration(seconds) else {
        eprintln!("Error: --seconds must be a non-negative number of seconds");
        process::exit(1);
    };

    let tuning = match flag_value(args, "--tuning") {
        Some(path) => match Tuning::load(PathBuf::from(path)) {
            Ok(t) => t,
            Err(e) => {
                log::error!("failed to load tuning from {path}: {e}");
                process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let (mut state, handle) = match game_loop::start(SimConfig { seed, tuning }) {
        Ok(started) => started,
        Err(e) => {
            log::error!("failed to start game loop: {e}");
            process::exit(1);
        }
    };

    // Forward stdin commands; the reader thread is abandoned at exit.
    if let Some(tx) = state.command_tx.clone() {
        let spawned = std::thread::Builder::new()
            .name("skirmish-stdin".into())
            .spawn(move || {
                for line in io::stdin().lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<PlayerCommand>(line) {
                        Ok(cmd) => {
                            if tx.send(GameLoopCommand::PlayerCommand(cmd)).is_err() {
                                break;
                            }
                        }
                        Err(e) => log::warn!("ignoring malformed command {line:?}: {e}"),
                    }
                }
            });
        if let Err(e) = spawned {
            log::warn!("stdin commands disabled: {e}");
        }
    }

    std::thread::sleep(run_for);
    state.shutdown();
    if handle.join().is_err() {
        log::error!("game loop thread panicked");
        process::exit(1);
    }

    match state.latest() {
        Some(snapshot) => print_json(&snapshot, true),
        None => log::warn!("loop stopped before the first tick"),
    }
}

// --- Replay command ---

fn cmd_replay(args: &[String]) {
    let Some(path) = args.first().filter(|a| !a.starts_with("--")) else {
        eprintln!("Error: replay needs a script path");
        process::exit(1);
    };
    let all = args.iter().any(|a| a == "--all");

    let script = match InputScript::load(path) {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to load script {path}: {e}");
            process::exit(1);
        }
    };
    log::info!(
        "replaying {} ticks, {} commands, seed {}",
        script.ticks,
        script.commands.len(),
        script.seed
    );

    let last = if all {
        replay::replay_with(&script, |snap| print_json(snap, false))
    } else {
        let last = replay::replay_final(&script);
        print_json(&last, true);
        last
    };

    let hud = &last.hud;
    log::info!(
        "finished at tick {}: health {}/{}, kills {}, shots {}",
        last.time.tick,
        hud.health,
        hud.max_health,
        hud.score.enemies_killed,
        hud.score.shots_fired
    );
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match out {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("failed to serialize snapshot: {e}");
            process::exit(1);
        }
    }
}
