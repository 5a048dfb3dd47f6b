//! Asteroids headless driver
//!
//! Runs a session without a window: a simple autopilot flies the ship,
//! then the run is signed into the high score table like a player would.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use asteroids::consts::FRAME_DT;
use asteroids::persistence::JsonFileStore;
use asteroids::sim::GameState;
use asteroids::{GameSession, InputEvent, Key, Screen, Settings, forward};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "asteroids")]
#[command(about = "Play a headless asteroid-field run with a scripted pilot")]
struct Cli {
    /// Settings file (JSON); defaults are used when missing
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// High score file, overriding the settings
    #[arg(long)]
    scores: Option<PathBuf>,
    /// RNG seed, overriding the settings
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many frames (10 minutes at 60fps = 36000)
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// Name entered if the run makes the table
    #[arg(long, default_value = "AUTO")]
    name: String,
    /// Write the effective settings to `--settings` and exit
    #[arg(long, default_value_t = false)]
    write_settings: bool,
}

/// Aim tolerance for turning (degrees)
const AIM_DEADBAND: f32 = 5.0;
/// Fire when the target is within this angle (degrees)
const FIRE_CONE: f32 = 10.0;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings);
    if let Some(path) = cli.scores {
        settings.high_score_path = path;
    }
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }

    if cli.write_settings {
        match settings.save(&cli.settings) {
            Ok(()) => println!("Wrote {}", cli.settings.display()),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Asteroids (headless) starting with seed {seed}");

    let store = JsonFileStore::new(&settings.high_score_path);
    let mut session = GameSession::new(seed, settings.tuning.clone(), Box::new(store));
    let mut held: HashSet<Key> = HashSet::new();

    session.update(FRAME_DT, &[InputEvent::KeyPress(Key::Enter)]);

    let mut frame = 0;
    while session.screen() == Screen::Playing && frame < cli.frames {
        let events = pilot(session.game(), &mut held);
        session.update(FRAME_DT, &events);
        frame += 1;
    }

    if session.screen() == Screen::Playing {
        log::info!("Frame limit reached, abandoning run");
        session.update(FRAME_DT, &[InputEvent::Quit]);
    } else {
        sign_in(&mut session, &cli.name);
    }

    println!(
        "Score {} after {:.1}s ({} frames)",
        session.score(),
        session.game().elapsed_secs(),
        frame
    );
    for (rank, entry) in session.high_scores().entries.iter().enumerate() {
        println!("{:>2}. {:<15} {:>8}", rank + 1, entry.name, entry.score);
    }
}

/// Seed from the wall clock when none is configured
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Steer toward the nearest asteroid and shoot when lined up. Emits key
/// press/release events for the difference from the previous frame.
fn pilot(game: &GameState, held: &mut HashSet<Key>) -> Vec<InputEvent> {
    let ship = game.ship_body();
    let target = game
        .registry
        .asteroids()
        .min_by(|a, b| {
            let da = a.body.pos.distance_squared(ship.pos);
            let db = b.body.pos.distance_squared(ship.pos);
            da.total_cmp(&db)
        })
        .map(|a| a.body.pos - ship.pos);

    let mut want = HashSet::new();
    if let Some(offset) = target {
        let error = forward(ship.rotation).angle_to(offset).to_degrees();
        if error > AIM_DEADBAND {
            want.insert(Key::Right);
        } else if error < -AIM_DEADBAND {
            want.insert(Key::Left);
        }
        if error.abs() < FIRE_CONE {
            want.insert(Key::Space);
        }
    }

    let mut events: Vec<InputEvent> = held
        .difference(&want)
        .map(|&k| InputEvent::KeyRelease(k))
        .collect();
    events.extend(want.difference(held).map(|&k| InputEvent::KeyPress(k)));
    *held = want;
    events
}

/// Walk the post-run screens: type a name if asked, then leave
fn sign_in(session: &mut GameSession, name: &str) {
    session.update(FRAME_DT, &[InputEvent::KeyPress(Key::Enter)]);
    if session.screen() == Screen::EnterName {
        let mut events: Vec<InputEvent> = name.chars().map(InputEvent::TextInput).collect();
        events.push(InputEvent::KeyPress(Key::Enter));
        session.update(FRAME_DT, &events);
    }
    session.update(FRAME_DT, &[InputEvent::KeyPress(Key::Escape)]);
}
