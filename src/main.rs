//! Terminal runner (default binary).
//!
//! Keyboard input is read on its own thread and gravity ticks on the engine
//! runtime; both feed one command channel, which this loop drains in order.
//! After game over the final frame stays up until the next key press.

use std::thread;

use anyhow::{Context, Result};
use crossterm::event;

use blockfall::core::{Game, GameSnapshot, MoveOutcome, UniformShapes};
use blockfall::engine::{Command, CommandSender, EngineConfig, Runtime, Session, Step};
use blockfall::input::{decode_event, InputEvent};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    eprintln!(
        "[Engine] board {}x{}, gravity {} ms, seed {}, clear policy {}",
        config.game.width,
        config.game.height,
        config.gravity_ms,
        config.seed,
        config.game.clear_policy.as_str(),
    );

    let (mut runtime, journal) = Runtime::start(&config)?;
    if let Some(path) = config.log_path.as_deref() {
        eprintln!("[Engine] journal -> {path}");
    }

    let game = Game::with_config(config.game, UniformShapes::new(config.seed))
        .context("failed to create board")?;
    let mut session = Session::new(game, journal);
    session.announce(config.seed);

    spawn_input_thread(runtime.sender());

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut runtime, &mut session);
    // Always try to restore terminal state.
    let restored = term.exit();

    let (game, journal) = session.finish();
    runtime.shutdown(journal);
    result?;
    restored?;

    if game.is_over() {
        println!("Game over, you got {} points.", game.score());
    } else {
        println!("Quit with {} points.", game.score());
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    runtime: &mut Runtime,
    session: &mut Session<UniformShapes>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    draw(term, &view, session, &mut snap, &mut fb)?;

    while let Some(cmd) = runtime.recv() {
        match session.apply(cmd) {
            Step::Quit => break,
            Step::Redraw => term.invalidate(),
            Step::Applied(MoveOutcome::Rejected) => continue,
            Step::Applied(_) => {}
        }
        draw(term, &view, session, &mut snap, &mut fb)?;
    }
    Ok(())
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    session: &Session<UniformShapes>,
    snap: &mut GameSnapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    session.game().snapshot_into(snap);
    let viewport = term.viewport().unwrap_or(FALLBACK_VIEWPORT);
    view.render_into(snap, viewport, fb);
    term.draw_swap(fb)
}

/// Forward decoded key presses until the consumer goes away.
fn spawn_input_thread(tx: CommandSender) {
    thread::spawn(move || loop {
        let cmd = match event::read() {
            Ok(ev) => match decode_event(&ev) {
                Some(InputEvent::Move(mv)) => Command::player(mv),
                Some(InputEvent::Resize) => Command::Redraw,
                Some(InputEvent::Quit) => Command::Quit,
                None => continue,
            },
            Err(_) => Command::Quit,
        };
        let quit = cmd == Command::Quit;
        if !tx.blocking_send(cmd) || quit {
            break;
        }
    });
}
