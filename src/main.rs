mod app;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use snekfx::{HighScores, Settings, SpeedLevel};

use crate::app::App;

#[derive(Parser)]
#[command(name = "snekfx")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Rows and columns of the square grid
    #[arg(long, default_value_t = 20)]
    size: u16,

    /// Snake start column
    #[arg(long, default_value_t = 10)]
    start_x: u16,

    /// Snake start row
    #[arg(long, default_value_t = 10)]
    start_y: u16,

    /// Terminal columns per grid cell
    #[arg(long, default_value_t = 2)]
    cell_width: u16,

    /// Initial speed: slow, medium, fast or extreme
    #[arg(long, default_value = "medium", value_parser = parse_speed)]
    speed: SpeedLevel,

    /// Let the snake leave one edge and come back on the opposite one
    #[arg(long)]
    wrap: bool,

    #[arg(long, default_value = ".snekfx_high_scores.txt")]
    high_score_file: PathBuf,

    #[arg(long, default_value = "snekfx.log")]
    log_file: PathBuf,

    /// Log engine events at debug level
    #[arg(long)]
    verbose: bool,
}

fn parse_speed(name: &str) -> Result<SpeedLevel, String> {
    SpeedLevel::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = SpeedLevel::ALL.iter().map(|s| s.name()).collect();
        format!("unknown speed {name:?}, expected one of {}", names.join(", "))
    })
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            row_and_column_count: self.size,
            snake_start_x: self.start_x,
            snake_start_y: self.start_y,
            cell_width: self.cell_width,
            speed: self.speed,
            wrap_around: self.wrap,
            high_score_file: self.high_score_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else, stdout belongs to the terminal UI
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    info!("Starting SnekFX");

    let settings = cli.settings();
    settings.validate().context("Invalid settings")?;

    let high_scores = match HighScores::load(&settings.high_score_file) {
        Ok(scores) => scores,
        Err(e) => {
            error!("Error loading high scores: {}", e);
            HighScores::default()
        }
    };

    let mut app = App::new(settings, high_scores);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Exiting SnekFX");
    result
}

/// Timer ticks and key presses are serialized here: wait for input no longer
/// than the next tick is due, then let the loop tick if it is time.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(app, f))?;

        if event::poll(app.time_until_tick(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(Instant::now());

        if app.should_exit() {
            return Ok(());
        }
    }
}
