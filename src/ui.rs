use ratatui::{
    layout::Flex,
    prelude::*,
    style::{Style, Stylize},
    widgets::*,
};

use snekfx::{LoopStatus, Outcome, Session};

use crate::app::{App, MenuItem, Overlay};

const FOOD_SYMBOL: &str = "♥";
const COLLISION_SYMBOL: &str = "✖";

pub fn render(app: &App, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title, points, speed, play/pause
            Constraint::Min(0),    // Game area
        ])
        .split(frame.area());

    render_status(app, frame, layout[0]);
    render_board(app, frame, layout[1]);

    match app.overlay() {
        Overlay::None => {}
        Overlay::Menu { selected } => render_menu(selected, frame, layout[1]),
        Overlay::HighScores => render_high_scores(app, frame, layout[1]),
        Overlay::About => render_about(frame, layout[1]),
        Overlay::GameOver { rank } => render_game_over(app, rank, frame, layout[1]),
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let button = app.play_pause();
    let button_style = if button.disabled {
        Style::default().dark_gray()
    } else {
        Style::default().bold()
    };
    let line = Line::from(vec![
        Span::raw(format!(
            "SNEKFX    Points: {}    High Score: {}    Speed: {}    ",
            app.points(),
            app.high_scores().best(),
            app.game_loop().speed()
        )),
        Span::styled(format!("[{}]", button.label), button_style),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Draws the bordered board centred in `area`.
fn render_board(app: &App, frame: &mut Frame, area: Rect) {
    let size = app.session().grid().size();
    let cell_width = app.settings().cell_width;
    let width = size.saturating_mul(cell_width).saturating_add(2);
    let height = size.saturating_add(2);

    let area = centered(area, width, height);

    let title = match app.game_loop().status() {
        LoopStatus::Running => "Playing",
        LoopStatus::Paused if app.session().is_over() => "Game over",
        LoopStatus::Paused => "Paused",
        LoopStatus::Stopped => "Ready",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner_area = block.inner(area);

    frame.render_widget(block, area);
    frame.render_widget(
        Board {
            session: app.session(),
            cell_width,
        },
        inner_area,
    );
}

struct Board<'a> {
    session: &'a Session,
    cell_width: u16,
}

impl Board<'_> {
    fn paint(&self, buf: &mut Buffer, area: Rect, cell: snekfx::Cell, symbol: &str, style: Style) {
        let y = area.y as u32 + cell.y as u32;
        if y >= area.bottom() as u32 {
            return;
        }
        let y = y as u16;
        // u32 so wide cells on a large grid cannot overflow before clipping.
        let left = area.x as u32 + cell.x as u32 * self.cell_width as u32;
        for col in 0..self.cell_width as u32 {
            let x = left + col;
            if x >= area.right() as u32 {
                break;
            }
            let symbol = if col == 0 { symbol } else { " " };
            buf[(x as u16, y)].set_symbol(symbol).set_style(style);
        }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snake = self.session.snake();
        for &cell in snake.body().iter().skip(1) {
            self.paint(buf, area, cell, " ", Style::default().bg(Color::Green));
        }

        if let Some(food) = self.session.food() {
            self.paint(buf, area, food, FOOD_SYMBOL, Style::default().fg(Color::LightRed));
        }

        // Head last so a collision marker overwrites what it ran into.
        if snake.is_collided() {
            let style = Style::default().fg(Color::White).bg(Color::Red);
            self.paint(buf, area, snake.head(), COLLISION_SYMBOL, style);
        } else {
            let style = Style::default().bg(Color::Yellow);
            self.paint(buf, area, snake.head(), " ", style);
        }
    }
}

/// A `width`×`height` rectangle centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 4;
    let width = width.max(title.len() as u16 + 4);
    let height = lines.len() as u16 + 2;
    let area = centered(area, width, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn render_menu(selected: usize, frame: &mut Frame, area: Rect) {
    let lines = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == selected {
                Line::from(format!("> {} <", item.label())).reversed()
            } else {
                Line::from(item.label())
            }
        })
        .collect();
    render_popup(frame, area, "Menu", lines);
}

fn render_high_scores(app: &App, frame: &mut Frame, area: Rect) {
    let entries = app.high_scores().entries();
    let mut lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from("No high scores yet")]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| Line::from(format!("{:>2}. {:>5}  {:<7}", i + 1, e.points, e.speed)))
            .collect()
    };
    lines.push(Line::from(""));
    lines.push(Line::from("Press ENTER to close").italic());
    render_popup(frame, area, "High Scores", lines);
}

fn render_about(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("SnekFX").bold(),
        Line::from("Eat, grow, don't bite yourself."),
        Line::from(""),
        Line::from("Arrows/WASD steer    SPACE play/pause"),
        Line::from("+/- speed    N new game    H high scores"),
        Line::from("M menu    Q quit"),
    ];
    render_popup(frame, area, "About", lines);
}

fn render_game_over(app: &App, rank: Option<usize>, frame: &mut Frame, area: Rect) {
    let headline = match app.session().outcome() {
        Outcome::Won => "YOU WON",
        _ => "GAME OVER",
    };
    let mut lines = vec![
        Line::from(headline).bold(),
        Line::from(format!("Final Score: {}", app.points())),
    ];
    if let Some(rank) = rank {
        lines.push(Line::from(format!("New high score, rank {}!", rank + 1)).yellow());
    }
    lines.push(Line::from("Press ENTER to play again"));
    render_popup(frame, area, "", lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Command;
    use ratatui::backend::TestBackend;
    use snekfx::{Cell, HighScores, Settings, SpeedLevel};

    fn settings() -> Settings {
        Settings {
            high_score_file: std::env::temp_dir()
                .join(format!("snekfx_ui_scores_{}.txt", std::process::id())),
            ..Settings::new(10, Cell::new(5, 5))
        }
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 21)).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_status_bar_and_board() {
        let app = App::new(settings(), HighScores::default());
        let buffer = draw(&app);
        let screen = text(&buffer);

        assert!(screen.contains("Points: 0"));
        assert!(screen.contains("Speed: Medium"));
        assert!(screen.contains("[Play]"));
        assert!(screen.contains("Paused"));
        assert!(screen.contains(FOOD_SYMBOL));

        // A 22x12 bordered board centred in the 80x18 game area puts the
        // inner board at (30, 7).
        let head = &buffer[(30 + 5 * 2, 7 + 5)];
        assert_eq!(head.bg, Color::Yellow);
    }

    #[test]
    fn test_wide_cells_on_large_grid_are_clipped() {
        let settings = Settings {
            cell_width: 400,
            ..Settings::new(200, Cell::new(199, 0))
        };
        assert_eq!(settings.validate(), Ok(()));
        let app = App::new(settings, HighScores::default());

        let screen = text(&draw(&app));

        assert!(screen.contains("Points: 0"));
    }

    #[test]
    fn test_menu_popup() {
        let mut app = App::new(settings(), HighScores::default());
        app.handle_command(Command::Menu);
        let screen = text(&draw(&app));

        assert!(screen.contains("> New game <"));
        assert!(screen.contains("High scores"));
        assert!(screen.contains("Exit"));
    }

    #[test]
    fn test_high_score_popup() {
        let mut scores = HighScores::default();
        scores.record(17, SpeedLevel::Fast);
        let mut app = App::new(settings(), scores);
        app.handle_command(Command::ShowHighScores);
        let screen = text(&draw(&app));

        assert!(screen.contains("High Score: 17"));
        assert!(screen.contains("1.    17  Fast"));
    }

    #[test]
    fn test_empty_high_score_popup() {
        let mut app = App::new(settings(), HighScores::default());
        app.handle_command(Command::ShowHighScores);
        assert!(text(&draw(&app)).contains("No high scores yet"));
    }
}
