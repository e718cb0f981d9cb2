use holonet::app::{App, AppFlow};
use holonet::cli::{AppConfig, Args};
use holonet::config::UserConfig;
use holonet::logging;
use holonet::tui::{self, handle_key_event, handle_mouse_event};
use holonet::SwapiClient;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::sync::Arc;
use std::time::Instant;
use std::{io, time::Duration};
use tracing::{info, warn};

/// Frame interval; short enough for the entry animation to look smooth
const TICK: Duration = Duration::from_millis(33);

/// Input wait when nothing on screen is moving
const IDLE_TICK: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    let config = AppConfig::resolve(&args, &user_config);

    if let Some(path) = config.log_file.clone().or_else(logging::default_log_path) {
        if let Err(e) = logging::init(&path, config.verbose) {
            eprintln!("Warning: {}", e);
        }
    }
    info!(base_url = %config.base_url, start = ?config.start, "Starting holonet");

    if args.save_config {
        config.store_into(&mut user_config);
        if let Err(e) = user_config.save() {
            eprintln!("Warning: Failed to save user config: {}", e);
        }
    }

    let client = match SwapiClient::new(&config.base_url, config.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut app = match App::new(&config, Arc::new(client)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Help has been seen once; don't open it on the next launch
    if config.show_help {
        user_config.help_shown = true;
        if let Err(e) = user_config.save() {
            warn!(error = %e, "Failed to save user config");
        }
    }

    info!("Exiting holonet");
    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut viewport = Rect::default();
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| {
            viewport = frame.area();
            tui::render(frame, app, now)
        })?;

        let wait = if app.is_animating(now) { TICK } else { IDLE_TICK };
        if !event::poll(wait)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = handle_key_event(key);
                if app.handle_action(action, Instant::now()) == AppFlow::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = handle_mouse_event(mouse) {
                    app.handle_pointer(pointer, viewport, Instant::now());
                }
            }
            _ => {}
        }
    }

    Ok(())
}
