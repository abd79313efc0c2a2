//! `chess-console`: run a chess engine behind a scrolling terminal console.
//!
//! Press Enter to send the input line, PageUp/PageDown or the arrows to
//! scroll, F1/F2/F3 to pick the font size, Ctrl-L to clear and Esc or
//! Ctrl-C to quit.

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use chess_console::terminal::{fit_app, Terminal};
use chess_console::{
    ConsoleApp, ConsoleConfig, FileInfo, FontSize, InputActor, InputEvent, KeyCode, KeyModifiers,
    Monospace, ProcessEngine, Result,
};
use clap::Parser;
use crossbeam_channel::{never, select, unbounded};

/// Directory name under the user data and cache directories.
const APP_NAME: &str = "chess-console";

/// Log file name inside the data directory.
const LOG_FILE: &str = "chess-console.log";

/// How long the UI loop waits before redrawing anyway.
const FRAME_TIMEOUT: Duration = Duration::from_millis(250);

/// How long the input thread blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: i32 = 3;

#[derive(Parser)]
#[command(name = "chess-console")]
#[command(version)]
#[command(about = "Scrolling terminal console for a chess engine")]
struct Cli {
    /// Engine program to run (default from config: crafty)
    #[arg(long, value_name = "PROGRAM")]
    engine: Option<String>,

    /// Config file (default: ./chess-console.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Console text size: 12, 16 or 20
    #[arg(long, value_name = "PX")]
    font_size: Option<i32>,

    /// Extra arguments passed to the engine
    #[arg(last = true)]
    engine_args: Vec<String>,
}

/// What the UI loop should do after a key.
enum Flow {
    Continue,
    Refit,
    Quit,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("chess-console: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let files = FileInfo::discover(APP_NAME);
    files.ensure_directories()?;
    init_logging(&files)?;

    let mut config = cli
        .config
        .as_deref()
        .map(ConsoleConfig::load)
        .or_else(|| ConsoleConfig::discover().as_deref().map(ConsoleConfig::load))
        .unwrap_or_default();
    if let Some(program) = cli.engine {
        config.engine.program = program;
    }
    if !cli.engine_args.is_empty() {
        config.engine.args = cli.engine_args;
    }
    if let Some(size) = cli.font_size {
        config.text_size = size;
    }

    let measure = Monospace::default();
    let mut app = ConsoleApp::new(measure, &config, files);
    let engine = ProcessEngine::new(config.engine.program.clone(), config.engine.args.clone());
    if let Err(e) = app.start(engine) {
        log::error!("Failed to start engine: {e}");
        app.on_message(&format!("[{e}]\n"));
    }

    let mut terminal = Terminal::enter()?;
    let result = event_loop(&mut terminal, &mut app, &measure);
    app.shutdown();
    drop(terminal);
    log::info!("Console closed");
    result
}

/// Send log output to `<data dir>/chess-console.log`; the terminal is in
/// raw mode for the whole session.
fn init_logging(files: &FileInfo) -> Result<()> {
    let path = files.data_directory().join(LOG_FILE);
    let file = File::create(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    log::info!("Logging to {}", path.display());
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal,
    app: &mut ConsoleApp<Monospace>,
    measure: &Monospace,
) -> Result<()> {
    let (input_tx, input_rx) = unbounded();
    let input = InputActor::spawn(input_tx, INPUT_POLL)?;

    let (cols, rows) = terminal.size();
    let mut cells = fit_app(app, measure, cols, rows);
    let mut engine_rx = app.engine_events().cloned().unwrap_or_else(never);

    terminal.draw(app, cells)?;

    loop {
        let mut engine_closed = false;
        let flow = select! {
            recv(input_rx) -> event => match event {
                Ok(event) => handle_input(app, terminal, event),
                Err(_) => Flow::Quit,
            },
            recv(engine_rx) -> event => {
                match event {
                    Ok(event) => app.handle_engine_event(event),
                    Err(_) => engine_closed = true,
                }
                Flow::Continue
            },
            default(FRAME_TIMEOUT) => Flow::Continue,
        };

        if engine_closed {
            log::debug!("Engine event queue closed");
            engine_rx = never();
        }
        match flow {
            Flow::Continue => {}
            Flow::Refit => {
                let (cols, rows) = terminal.size();
                cells = fit_app(app, measure, cols, rows);
            }
            Flow::Quit => break,
        }

        if app.needs_redraw() {
            terminal.draw(app, cells)?;
        }
    }

    input.join();
    Ok(())
}

fn handle_input(
    app: &mut ConsoleApp<Monospace>,
    terminal: &mut Terminal,
    event: InputEvent,
) -> Flow {
    match event {
        InputEvent::Key { code, modifiers } => handle_key(app, code, modifiers),
        InputEvent::MouseScroll { delta } => {
            app.scroll_lines(-i32::from(delta) * WHEEL_LINES);
            Flow::Continue
        }
        InputEvent::Resize { width, height } => {
            terminal.resize(width, height);
            Flow::Refit
        }
        InputEvent::Paste(text) => {
            app.push_str(&text);
            Flow::Continue
        }
        InputEvent::Error(message) => {
            log::warn!("Input error: {message}");
            Flow::Continue
        }
        InputEvent::Shutdown => Flow::Quit,
    }
}

fn handle_key(app: &mut ConsoleApp<Monospace>, code: KeyCode, modifiers: KeyModifiers) -> Flow {
    if modifiers.control {
        return match code {
            KeyCode::Char('c') => Flow::Quit,
            KeyCode::Char('l') => {
                app.clear_console();
                Flow::Continue
            }
            _ => Flow::Continue,
        };
    }

    match code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Enter => {
            if let Err(e) = app.submit() {
                log::warn!("Send failed: {e}");
                app.on_message(&format!("[{e}]\n"));
            }
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Up => app.scroll_lines(-1),
        KeyCode::Down => app.scroll_lines(1),
        KeyCode::PageUp => app.scroll_pages(-1),
        KeyCode::PageDown => app.scroll_pages(1),
        KeyCode::Home => app.scroll_home(),
        KeyCode::End => app.scroll_end(),
        KeyCode::F(n @ 1..=3) => {
            let font = match n {
                1 => FontSize::Small,
                2 => FontSize::Medium,
                _ => FontSize::Big,
            };
            app.set_font_size(font.value());
            return Flow::Refit;
        }
        KeyCode::F(_) => {}
    }
    Flow::Continue
}
