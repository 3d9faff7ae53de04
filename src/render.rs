use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::error::GameError;
use crate::grid::Tile;
use crate::session::{Outcome, Session};

const CELL_W: usize = 1;

const WALL_COLOR: Color = Color::Rgb { r: 69, g: 69, b: 69 };
const COIN_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const EXIT_CLOSED_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const EXIT_OPEN_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const PLAYER_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 255 };

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Wall,
    Open,
    Coin,
    ExitClosed,
    ExitOpen,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Cell-diff frame painter: repaints only cells that changed since the last
/// frame, with a full repaint after resizes or re-centering.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

pub fn draw(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    let grid = session.grid();
    let needed_h = (grid.height() + 2) as u16;
    let needed_w = (grid.width() * CELL_W) as u16;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "Coins: {}/{}   wasd/arrows move, t surrender, q quit",
        session.player().coins(),
        session.max_coins()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = cell_for(session, x, y);
            let idx = y * grid.width() + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_for(session: &Session, x: usize, y: usize) -> Cell {
    if session.player().pos() == (x, y) {
        return Cell {
            glyph: Glyph::Player,
            color: PLAYER_COLOR,
        };
    }
    match session.grid().tile(x, y) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: WALL_COLOR,
        },
        Tile::Open => Cell {
            glyph: Glyph::Open,
            color: Color::Reset,
        },
        Tile::Coin => Cell {
            glyph: Glyph::Coin,
            color: COIN_COLOR,
        },
        Tile::ExitClosed => Cell {
            glyph: Glyph::ExitClosed,
            color: EXIT_CLOSED_COLOR,
        },
        Tile::ExitOpen => Cell {
            glyph: Glyph::ExitOpen,
            color: EXIT_OPEN_COLOR,
        },
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: Cell,
) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "v",
        Glyph::Wall => "#",
        Glyph::Open => " ",
        Glyph::Coin => "*",
        Glyph::ExitClosed => "x",
        Glyph::ExitOpen => "^",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Setup screen: legend, last round's outcome, and numeric entry for the
/// next maze's dimensions. Returns `None` when the player quits instead.
pub fn setup_screen(
    stdout: &mut Stdout,
    outcome: Option<Outcome>,
    error: Option<&GameError>,
    max_coins: usize,
) -> io::Result<Option<(usize, usize)>> {
    stdout.queue(Clear(ClearType::All))?;
    stdout.queue(MoveTo(0, 0))?;
    stdout.queue(SetForegroundColor(Color::White))?;
    stdout.queue(Print("Enter the map size (9-159, even rounds down):"))?;
    stdout.queue(MoveTo(0, 1))?;
    stdout.queue(Print("Width:"))?;
    stdout.queue(MoveTo(0, 2))?;
    stdout.queue(Print("Height:"))?;

    let legend: [(&str, Color, &str); 5] = [
        ("v", PLAYER_COLOR, "you"),
        ("*", COIN_COLOR, "coin"),
        ("x", EXIT_CLOSED_COLOR, "exit (closed)"),
        ("^", EXIT_OPEN_COLOR, "exit (open)"),
        ("#", WALL_COLOR, "wall"),
    ];
    for (row, (glyph, color, label)) in legend.iter().enumerate() {
        stdout.queue(MoveTo(0, 6 + row as u16))?;
        stdout.queue(SetForegroundColor(*color))?;
        stdout.queue(Print(glyph))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(format!(" {label}")))?;
    }
    stdout.queue(MoveTo(0, 12))?;
    stdout.queue(Print(format!(
        "Collect all {max_coins} coins to open the exit. In game: t surrenders, q quits."
    )))?;

    if let Some(outcome) = outcome {
        stdout.queue(MoveTo(0, 14))?;
        match outcome {
            Outcome::Escaped => {
                stdout.queue(SetForegroundColor(EXIT_OPEN_COLOR))?;
                stdout.queue(Print("Congratulations! You escaped the maze!"))?;
            }
            Outcome::Surrendered => {
                stdout.queue(SetForegroundColor(EXIT_CLOSED_COLOR))?;
                stdout.queue(Print("You have surrendered..."))?;
            }
        }
        stdout.queue(SetForegroundColor(Color::White))?;
    }
    if let Some(error) = error {
        stdout.queue(MoveTo(0, 4))?;
        stdout.queue(SetForegroundColor(EXIT_CLOSED_COLOR))?;
        stdout.queue(Print(format!("Wrong input: {error}")))?;
        stdout.queue(SetForegroundColor(Color::White))?;
    }

    stdout.queue(Show)?;
    stdout.flush()?;

    let width = match read_number(stdout, 7, 1)? {
        Some(n) => n,
        None => return Ok(None),
    };
    let height = match read_number(stdout, 8, 2)? {
        Some(n) => n,
        None => return Ok(None),
    };

    stdout.queue(Hide)?;
    stdout.queue(Clear(ClearType::All))?;
    stdout.flush()?;
    Ok(Some((width, height)))
}

/// Raw-mode numeric entry at a fixed cursor cell: digits accumulate,
/// backspace edits, enter confirms (once non-empty), esc/q abandons.
fn read_number(stdout: &mut Stdout, col: u16, row: u16) -> io::Result<Option<usize>> {
    let mut digits = String::new();
    loop {
        stdout.queue(MoveTo(col, row))?;
        stdout.queue(Print(format!("{digits:<4}")))?;
        stdout.queue(MoveTo(col + digits.len() as u16, row))?;
        stdout.flush()?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char(c @ '0'..='9') if digits.len() < 3 => digits.push(c),
                KeyCode::Backspace => {
                    digits.pop();
                }
                KeyCode::Enter if !digits.is_empty() => {
                    // Only digits ever land in the buffer, so this parse
                    // cannot fail.
                    return Ok(digits.parse().ok());
                }
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                _ => {}
            }
        }
    }
}
