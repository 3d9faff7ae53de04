mod carver;
mod error;
mod grid;
mod input;
mod pickups;
mod player;
mod render;
mod session;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use crate::error::GameError;
use crate::input::Command;
use crate::render::Renderer;
use crate::session::{Outcome, Session};

const DEFAULT_TICK_MS: u64 = 60;
const DEFAULT_RENDER_FPS: u64 = 60;

fn main() -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> Result<()> {
    let mut rng = rand::thread_rng();
    let (tick_ms, render_fps) = read_speed_settings();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut outcome: Option<Outcome> = None;

    loop {
        // Awaiting setup: prompt until the dimensions produce a maze.
        let mut error: Option<GameError> = None;
        let mut session = loop {
            let dims =
                render::setup_screen(stdout, outcome, error.as_ref(), pickups::MAX_COINS)?;
            let Some((width, height)) = dims else {
                return Ok(());
            };
            match Session::new(width, height, pickups::MAX_COINS, &mut rng) {
                Ok(session) => break session,
                Err(e) => error = Some(e),
            }
        };
        outcome = None;

        let mut renderer = Renderer::new(session.grid().width(), session.grid().height());
        let mut last_tick = Instant::now();

        // Playing: one tick = at most one key, gate update, movement, render.
        loop {
            let frame_start = Instant::now();

            if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
                last_tick = Instant::now();
                let command = input::poll_command()?;
                if command == Some(Command::Quit) {
                    return Ok(());
                }
                session.update_exit_gate();
                match command {
                    Some(Command::Move(dir)) => session.move_player(dir),
                    Some(Command::Surrender) => session.surrender(),
                    Some(Command::Quit) | None => {}
                }
                if let Some(end) = session.outcome() {
                    outcome = Some(end);
                    break;
                }
            }

            render::draw(stdout, &session, &mut renderer)?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}
