use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{error, info};

use snekfx::{Direction, GameLoop, HighScores, LoopStatus, Outcome, Session, Settings, SpeedLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePlay,
    NewGame,
    Faster,
    Slower,
    ShowHighScores,
    Menu,
    Confirm,
    Back,
    Exit,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Exit);
        }
        let command = match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                Command::Steer(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                Command::Steer(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Command::Steer(Direction::Right)
            }
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePlay,
            KeyCode::Char('n') | KeyCode::Char('N') => Command::NewGame,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::Faster,
            KeyCode::Char('-') | KeyCode::Char('_') => Command::Slower,
            KeyCode::Char('h') | KeyCode::Char('H') => Command::ShowHighScores,
            KeyCode::F(1) | KeyCode::Char('m') | KeyCode::Char('M') => Command::Menu,
            KeyCode::Enter => Command::Confirm,
            KeyCode::Esc => Command::Back,
            KeyCode::Char('q') | KeyCode::Char('Q') => Command::Exit,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    HighScores,
    About,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::NewGame,
        MenuItem::HighScores,
        MenuItem::About,
        MenuItem::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "New game",
            MenuItem::HighScores => "High scores",
            MenuItem::About => "About",
            MenuItem::Exit => "Exit",
        }
    }
}

/// What is drawn on top of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    Menu { selected: usize },
    HighScores,
    About,
    GameOver { rank: Option<usize> },
}

/// The play/pause button: its label follows the loop status and it is
/// disabled from a collision until the next new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayPauseButton {
    pub label: &'static str,
    pub disabled: bool,
}

impl Default for PlayPauseButton {
    fn default() -> Self {
        PlayPauseButton {
            label: "Play",
            disabled: false,
        }
    }
}

impl PlayPauseButton {
    fn on_status(&mut self, status: LoopStatus, playable: bool) {
        self.label = match status {
            LoopStatus::Running => "Pause",
            LoopStatus::Stopped | LoopStatus::Paused => "Play",
        };
        self.disabled = !playable;
    }

    fn on_collision(&mut self) {
        self.disabled = true;
    }
}

pub struct App {
    settings: Settings,
    session: Session,
    game_loop: GameLoop,
    play_pause: Rc<RefCell<PlayPauseButton>>,
    points: Rc<Cell<u32>>,
    high_scores: HighScores,
    overlay: Overlay,
    /// High-score rank of the game that just ended, shown again when a
    /// dialog opened from the result closes.
    final_rank: Option<usize>,
    exit: bool,
}

impl App {
    /// How long to wait for input while the loop is not ticking.
    pub const IDLE_POLL: Duration = Duration::from_millis(250);

    pub fn new(settings: Settings, high_scores: HighScores) -> Self {
        let mut session = Session::new(&settings);
        let mut game_loop = GameLoop::new(settings.speed);
        let play_pause = Rc::new(RefCell::new(PlayPauseButton::default()));
        let points = Rc::new(Cell::new(0));

        let button = Rc::clone(&play_pause);
        game_loop.add_status_listener(move |status, playable| {
            button.borrow_mut().on_status(status, playable)
        });
        let button = Rc::clone(&play_pause);
        session
            .snake_mut()
            .add_collision_listener(move || button.borrow_mut().on_collision());
        let counter = Rc::clone(&points);
        session
            .snake_mut()
            .add_points_listener(move || counter.set(counter.get() + 1));

        let mut app = App {
            settings,
            session,
            game_loop,
            play_pause,
            points,
            high_scores,
            overlay: Overlay::None,
            final_rank: None,
            exit: false,
        };
        app.new_game();
        app
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    pub fn play_pause(&self) -> PlayPauseButton {
        *self.play_pause.borrow()
    }

    pub fn points(&self) -> u32 {
        self.points.get()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.game_loop
            .time_until_tick(now)
            .unwrap_or(Self::IDLE_POLL)
    }

    pub fn new_game(&mut self) {
        self.game_loop.init();
        self.play_pause.borrow_mut().disabled = false;
        self.session.new_game();
        self.points.set(0);
        self.game_loop.pause();
        self.final_rank = None;
        self.overlay = Overlay::None;
    }

    pub fn toggle_play(&mut self) {
        if self.play_pause.borrow().disabled {
            return;
        }
        self.game_loop.toggle();
    }

    pub fn set_speed(&mut self, speed: SpeedLevel) {
        self.game_loop.set_speed(speed);
    }

    /// Runs a tick if one is due and handles the end of a game.
    pub fn tick(&mut self, now: Instant) {
        if self.game_loop.poll(now, &mut self.session) && self.session.is_over() {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        let points = self.points.get();
        match self.session.outcome() {
            Outcome::Won => info!("Board filled with {} points", points),
            _ => info!("Game over with {} points", points),
        }
        let rank = self.high_scores.record(points, self.game_loop.speed());
        if rank.is_some() {
            if let Err(e) = self.high_scores.save(&self.settings.high_score_file) {
                error!("Error saving high scores: {}", e);
            }
        }
        self.final_rank = rank;
        self.overlay = Overlay::GameOver { rank };
    }

    fn open(&mut self, overlay: Overlay) {
        self.game_loop.pause();
        self.overlay = overlay;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = Command::from_key(key) {
            self.handle_command(command);
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match self.overlay {
            Overlay::None => match command {
                Command::Steer(direction) => self.session.set_direction(direction),
                Command::TogglePlay => self.toggle_play(),
                Command::NewGame => self.new_game(),
                Command::Faster => self.set_speed(self.game_loop.speed().faster()),
                Command::Slower => self.set_speed(self.game_loop.speed().slower()),
                Command::ShowHighScores => self.open(Overlay::HighScores),
                Command::Menu => self.open(Overlay::Menu { selected: 0 }),
                Command::Exit | Command::Back => self.exit = true,
                Command::Confirm => {}
            },
            Overlay::Menu { selected } => match command {
                Command::Steer(Direction::Up) => {
                    let selected = selected.checked_sub(1).unwrap_or(MenuItem::ALL.len() - 1);
                    self.overlay = Overlay::Menu { selected };
                }
                Command::Steer(Direction::Down) => {
                    let selected = (selected + 1) % MenuItem::ALL.len();
                    self.overlay = Overlay::Menu { selected };
                }
                Command::Confirm => self.select(MenuItem::ALL[selected]),
                Command::Menu | Command::Back => self.overlay = Overlay::None,
                Command::Exit => self.exit = true,
                _ => {}
            },
            Overlay::HighScores | Overlay::About => match command {
                Command::Confirm | Command::Back | Command::ShowHighScores | Command::Menu => {
                    self.overlay = self.resting_overlay()
                }
                Command::Exit => self.exit = true,
                _ => {}
            },
            Overlay::GameOver { .. } => match command {
                Command::Confirm | Command::NewGame | Command::TogglePlay => self.new_game(),
                Command::ShowHighScores => self.overlay = Overlay::HighScores,
                Command::Menu => self.overlay = Overlay::Menu { selected: 0 },
                Command::Exit | Command::Back => self.exit = true,
                _ => {}
            },
        }
    }

    fn select(&mut self, item: MenuItem) {
        match item {
            MenuItem::NewGame => self.new_game(),
            MenuItem::HighScores => self.overlay = Overlay::HighScores,
            MenuItem::About => self.overlay = Overlay::About,
            MenuItem::Exit => self.exit = true,
        }
    }

    /// Closing a dialog after the game ended goes back to the result.
    fn resting_overlay(&self) -> Overlay {
        if self.session.is_over() {
            Overlay::GameOver {
                rank: self.final_rank,
            }
        } else {
            Overlay::None
        }
    }
}
