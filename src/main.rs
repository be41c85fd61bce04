mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use bubble_pop::compute::{init_session, tick};
use bubble_pop::entities::{Pace, PointerInput};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Pace),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◉  BUBBLE  POP  ◉";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select pace:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Relaxed", Color::Green,  "60 seconds, gentle spawns"),
        ("2", "Classic", Color::Yellow, "30 seconds on the clock"),
        ("3", "Frantic", Color::Red,    "30 seconds, double spawn rate"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    // How-to-play legend
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("How to play (click bubbles to pop them):"))?;

    let legend: &[(&str, Color, &str)] = &[
        ("●", Color::Cyan,    " Lone bubbles pay up to 100 points"),
        ("●", Color::DarkGrey, " A crowded screen pays as little as 10"),
        ("◉", Color::Magenta, " Flashing bubbles pop the whole screen"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy + 3 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 7))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Let the screen fill past 20 bubbles and it's over."))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 9))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Mouse : Aim + Click   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Pace::Relaxed)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Pace::Classic)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Pace::Frantic)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-timestep loop: drain input, advance the simulation one tick,
/// render, sleep off the rest of the frame.
///
/// Input model: mouse movement events track the pointer cell; a left-button
/// `Down` event raises the pressed flag for exactly one tick, which is the
/// edge-triggered press the simulation expects.  Restarting after game over
/// is the same click, handled inside `tick`.  Resize events re-map the
/// cell↔playfield scaling on the fly.
fn game_loop<W: Write>(out: &mut W, pace: Pace, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let (mut width, mut height) = terminal::size()?;
    let mut pointer_cell = (width / 2, height / 2);
    let mut state = init_session(pace, 0, &mut rng);

    loop {
        let frame_start = Instant::now();
        let mut pressed = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(());
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    pointer_cell = (column, row);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        pressed = true;
                    }
                }
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                }
                _ => {}
            }
        }

        let input = PointerInput {
            pos: display::cell_to_playfield(pointer_cell.0, pointer_cell.1, width, height),
            pressed,
        };
        state = tick(&state, &input, &mut rng);

        display::render(out, &state, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    match show_menu(out, rx)? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start(pace) => game_loop(out, pace, rx),
    }
}
