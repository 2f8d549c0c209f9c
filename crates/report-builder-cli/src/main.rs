mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use report_builder_config::Config;
use report_builder_engine::{LoadOutcome, Session, io};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

/// Default log filter for a command line; `RUST_LOG` overrides it.
///
/// The TUI owns the terminal, so it logs nothing unless asked to.
fn default_log_filter(args: &[String]) -> &'static str {
    match args.get(1).map(String::as_str) {
        Some("export") => "warn",
        _ => "off",
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(&args)),
    )
    .init();

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Error: Failed to load config file {}: {e}",
                Config::config_path().display()
            );
            process::exit(1);
        }
    };
    log::info!("Output directory: {}", config.output_path.display());

    match args.get(1).map(String::as_str) {
        Some("export") => {
            let Some(project) = args.get(2) else {
                eprintln!("Usage: {} export <project.json> [out.txt]", args[0]);
                process::exit(1);
            };
            let out = args.get(3).map(PathBuf::from);
            export_project(Path::new(project), out, &config)
        }
        Some(project) if args.len() == 2 => run_tui(&config, Some(Path::new(project))),
        None => run_tui(&config, None),
        Some(_) => {
            eprintln!("Usage: {} [project.json]", args[0]);
            eprintln!("       {} export <project.json> [out.txt]", args[0]);
            process::exit(1);
        }
    }
}

/// Write the plain-text export of a saved project without opening the TUI
fn export_project(project: &Path, out: Option<PathBuf>, config: &Config) -> Result<()> {
    let text = io::read_file(project)?;
    let file_name = project
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut session = Session::new(&config.theme);
    if let LoadOutcome::Loaded { blocks, .. } = session.load_project(&file_name, &text, |_| true)? {
        log::info!("Exporting {blocks} blocks from {}", project.display());
    }

    let exported = session.export_text();
    let out = out.unwrap_or_else(|| config.output_path.join(&exported.file_name));
    io::write_file(&out, &exported.text)?;
    println!("{}", out.display());
    Ok(())
}

fn run_tui(config: &Config, project: Option<&Path>) -> Result<()> {
    let mut app = App::new(&config.theme, config.output_path.clone());
    if let Some(project) = project
        && let Err(e) = app.open_project(project)
    {
        eprintln!("Error: Could not open '{}': {e}", project.display());
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.on_key(key.code)
        {
            return Ok(());
        }
    }
}
