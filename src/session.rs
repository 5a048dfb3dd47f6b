//! Session state machine
//!
//! Owns the current run and the high score table, and moves between
//! screens in response to abstract input events:
//!
//! ```text
//! TitleScreen --any key--> Playing --ship hit--> GameOver --any key--> EnterName | HighScores
//! EnterName --enter--> HighScores --r--> Playing
//!                                 --q/esc--> Exited
//! ```
//!
//! `Quit` leaves from any screen. Unrecognized input never changes state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::ScoreStore;
use crate::sim::{EntityClass, GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Name stored when the player confirms an empty name
pub const ANONYMOUS_NAME: &str = "???";

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    TitleScreen,
    Playing,
    GameOver,
    EnterName,
    HighScores,
    /// Terminal: the host should shut down
    Exited,
}

/// Abstract keys the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Input from the window/event collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or equivalent
    Quit,
    KeyPress(Key),
    KeyRelease(Key),
    /// A typed character (already layout-translated)
    TextInput(char),
}

/// Held ship controls, fed from key press/release events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Controls {
    left: bool,
    right: bool,
    forward: bool,
    reverse: bool,
    fire: bool,
}

impl Controls {
    /// Record a key going down (`true`) or up. Keys that don't steer the
    /// ship are ignored.
    fn set(&mut self, key: Key, down: bool) {
        let slot = match key {
            Key::Left | Key::Char('a' | 'A') => &mut self.left,
            Key::Right | Key::Char('d' | 'D') => &mut self.right,
            Key::Up | Key::Char('w' | 'W') => &mut self.forward,
            Key::Down | Key::Char('s' | 'S') => &mut self.reverse,
            Key::Space => &mut self.fire,
            _ => return,
        };
        *slot = down;
    }

    fn tick_input(&self) -> TickInput {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        TickInput {
            turn: axis(self.left, self.right),
            thrust: axis(self.reverse, self.forward),
            fire: self.fire,
        }
    }
}

/// One entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub class: EntityClass,
    pub pos: Vec2,
    pub radius: f32,
    /// Degrees
    pub rotation: f32,
}

/// Read-only per-frame view for the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub screen: Screen,
    pub score: u64,
    pub entities: Vec<EntityView>,
    /// Present on the name entry and high score screens
    pub high_scores: Option<&'a [HighScoreEntry]>,
    /// Present on the name entry screen
    pub name: Option<&'a str>,
}

/// Whole-program game session
pub struct GameSession {
    screen: Screen,
    game: GameState,
    high_scores: HighScores,
    store: Box<dyn ScoreStore>,
    name: String,
    controls: Controls,
    /// Seeds each new run
    seeder: Pcg32,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("screen", &self.screen)
            .field("score", &self.game.score)
            .field("entities", &self.game.registry.len())
            .field("high_scores", &self.high_scores.len())
            .field("name", &self.name)
            .finish()
    }
}

impl GameSession {
    /// Start on the title screen with the table loaded from `store`
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn ScoreStore>) -> Self {
        let high_scores = store.load();
        let mut seeder = Pcg32::seed_from_u64(seed);
        let game = GameState::new(seeder.random(), tuning);
        log::info!(
            "Session started (seed {seed}, {} high scores)",
            high_scores.len()
        );

        Self {
            screen: Screen::TitleScreen,
            game,
            high_scores,
            store,
            name: String::new(),
            controls: Controls::default(),
            seeder,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// True once the session reached its terminal state
    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Exited
    }

    pub fn score(&self) -> u64 {
        self.game.score
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Direct access to the current run (scenario setup, demos)
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Pending name on the name entry screen
    pub fn name_buffer(&self) -> &str {
        &self.name
    }

    /// One frame: apply `events` in order, then simulate if playing.
    /// Returns what happened in the simulation this frame.
    pub fn update(&mut self, dt: f32, events: &[InputEvent]) -> Vec<GameEvent> {
        for &event in events {
            if self.is_finished() {
                break;
            }
            self.handle_event(event);
        }

        if self.screen != Screen::Playing {
            return Vec::new();
        }

        let input = self.controls.tick_input();
        let events = tick(&mut self.game, &input, dt);
        if self.game.ship_destroyed {
            self.set_screen(Screen::GameOver);
        }
        events
    }

    /// Apply one input event. Returns true if the screen changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let before = self.screen;

        if event == InputEvent::Quit {
            if self.screen != Screen::Exited {
                self.set_screen(Screen::Exited);
            }
            return self.screen != before;
        }

        match (self.screen, event) {
            (Screen::TitleScreen, InputEvent::KeyPress(_)) => self.set_screen(Screen::Playing),

            (Screen::Playing, InputEvent::KeyPress(key)) => {
                self.controls.set(key, true);
            }
            (Screen::Playing, InputEvent::KeyRelease(key)) => {
                self.controls.set(key, false);
            }

            (Screen::GameOver, InputEvent::KeyPress(_)) => self.continue_from_game_over(),

            (Screen::EnterName, InputEvent::TextInput(c)) => self.push_name_char(c),
            (Screen::EnterName, InputEvent::KeyPress(Key::Backspace)) => {
                self.name.pop();
            }
            (Screen::EnterName, InputEvent::KeyPress(Key::Enter)) => self.confirm_name(),

            (Screen::HighScores, InputEvent::KeyPress(Key::Char('r' | 'R'))) => {
                self.restart();
            }
            (Screen::HighScores, InputEvent::KeyPress(Key::Char('q' | 'Q') | Key::Escape)) => {
                self.set_screen(Screen::Exited);
            }

            _ => {}
        }

        self.screen != before
    }

    /// Read-only view of everything the renderer needs this frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        let entities = self
            .game
            .registry
            .iter()
            .map(|e| EntityView {
                class: e.class(),
                pos: e.body.pos,
                radius: e.body.radius,
                rotation: e.body.rotation,
            })
            .collect();

        let show_table = matches!(self.screen, Screen::EnterName | Screen::HighScores);
        Snapshot {
            screen: self.screen,
            score: self.game.score,
            entities,
            high_scores: show_table.then_some(self.high_scores.entries.as_slice()),
            name: (self.screen == Screen::EnterName).then_some(self.name.as_str()),
        }
    }

    /// Throw away the current run and start a new one immediately
    pub fn restart(&mut self) {
        let tuning = self.game.tuning.clone();
        self.game = GameState::new(self.seeder.random(), tuning);
        self.controls = Controls::default();
        self.name.clear();
        log::info!("New run (seed {})", self.game.seed);
        self.set_screen(Screen::Playing);
    }

    fn set_screen(&mut self, next: Screen) {
        log::info!("Screen {:?} -> {:?}", self.screen, next);
        if next != Screen::Playing {
            self.controls = Controls::default();
        }
        self.screen = next;
    }

    fn continue_from_game_over(&mut self) {
        if self.high_scores.qualifies(self.game.score) {
            self.name.clear();
            self.set_screen(Screen::EnterName);
        } else {
            self.set_screen(Screen::HighScores);
        }
    }

    fn push_name_char(&mut self, c: char) {
        if c.is_control() || self.name.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.name.push(c);
    }

    fn confirm_name(&mut self) {
        let name = match self.name.trim() {
            "" => ANONYMOUS_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        if let Some(rank) = self.high_scores.insert(&name, self.game.score) {
            log::info!("{name} placed #{rank} with {}", self.game.score);
            if let Err(e) = self.store.save(&self.high_scores) {
                log::warn!("High scores not saved: {e}");
            }
        }
        self.set_screen(Screen::HighScores);
    }
}
