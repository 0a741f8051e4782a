use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use f1_race::compute::{
    init_session, move_player_left, move_player_right, snapshot, tick_opponent, tick_score,
};
use f1_race::display;
use f1_race::entities::{GameSession, SessionConfig, SessionPhase};
use f1_race::scheduler::{Activity, Scheduler};

/// Render cadence, independent of the simulation tick periods.
const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Configuration loading ─────────────────────────────────────────────────────

/// Read a JSON session config; fields not present fall back to the
/// reference defaults.
fn load_config(path: &str) -> std::io::Result<SessionConfig> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum TitleResult {
    Start,
    Quit,
}

fn show_title<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<TitleResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color)] = &[
        ("★  F1  RACE  ★", Color::Cyan),
        ("", Color::White),
        ("Dodge the oncoming cars for as long as you can.", Color::White),
        ("", Color::White),
        ("← → / A D : Steer   ENTER : Start   Q : Quit", Color::DarkGrey),
    ];

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(TitleResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(TitleResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to a fresh session.
///
/// The loop drains discrete input events, dispatches whichever periodic
/// activities have come due on the monotonic clock, and renders a snapshot
/// at its own cadence.  The moment the session latches to `Over` the
/// scheduler is cancelled, so no motion or score activity fires again for
/// this session; a restart constructs a brand-new session.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let config = session.config.clone();
    let mut scheduler = Scheduler::new(&config, Instant::now());

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(true);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if session.phase == SessionPhase::Over =>
                {
                    return Ok(false);
                }
                // One discrete step per press/repeat event; compute ignores
                // these once the session is over.
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    *session = move_player_left(session);
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    *session = move_player_right(session);
                }
                _ => {}
            }
        }

        // ── Dispatch due periodic activities ──────────────────────────────────
        for activity in scheduler.due(Instant::now()) {
            *session = match activity {
                Activity::Opponent(slot) => tick_opponent(session, slot),
                Activity::Score => tick_score(session),
            };
            if session.phase == SessionPhase::Over {
                break;
            }
        }
        if session.phase == SessionPhase::Over && !scheduler.is_cancelled() {
            scheduler.cancel();
        }

        display::render(out, &snapshot(session), &config, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Stderr logging only when asked for; redirect it to keep the screen clean
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => SessionConfig::default(),
    };

    // Fail fast on an unplayable config before touching the terminal
    if let Err(e) = init_session(config.clone()) {
        eprintln!("invalid session config: {e}");
        std::process::exit(1);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &SessionConfig,
) -> std::io::Result<()> {
    loop {
        match show_title(out, rx)? {
            TitleResult::Quit => break,
            TitleResult::Start => {
                // Validated at startup, so this cannot fail here
                let mut session = init_session(config.clone())
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
                if game_loop(out, &mut session, rx)? {
                    break;
                }
                // Otherwise loop back to the title for a fresh session
            }
        }
    }
    Ok(())
}
