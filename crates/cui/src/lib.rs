mod actions;
mod app;
mod input;
mod script;
mod view;

pub use app::{format_card, format_event, slot_text};
pub use script::{load_auto_perform_file, parse_auto_perform, AutoPerformScript, ScriptAction};

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::OpenOptions;
use std::io::{self, stdout, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wildpile_core::GameConfig;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub auto_perform_json: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    if let Some(path) = options.log_file.as_ref() {
        let filter = options.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
        init_file_logging(path, filter)?;
    }

    let mut seed = options.seed;
    let mut auto_actions = None;
    if let Some(path) = options.auto_perform_json.as_ref() {
        let script = load_auto_perform_file(path)
            .map_err(|err| anyhow::anyhow!(err))
            .with_context(|| format!("load auto perform json from {}", path.display()))?;
        if seed.is_none() {
            seed = script.seed;
        }
        auto_actions = Some(script.actions);
    }

    let mut app = App::new(&GameConfig { seed });
    info!(seed = app.game.seed(), "terminal ui starting");
    if let Some(actions) = auto_actions {
        app.auto_perform_actions(&actions)
            .map_err(|err| anyhow::anyhow!(err))
            .context("apply auto perform actions")?;
    }

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

/// Sends `tracing` output to a file so it does not draw over the terminal UI.
pub fn init_file_logging(path: &Path, filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut seed = std::env::var("WILDPILE_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut log_file = std::env::var_os("WILDPILE_LOG_FILE").map(PathBuf::from);
    let mut log_filter = std::env::var("WILDPILE_LOG").ok();
    let mut auto_perform_json = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--auto-perform-json" | "--auto-json" => {
                if let Some(value) = args.get(idx + 1) {
                    auto_perform_json = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--log-file" => {
                if let Some(value) = args.get(idx + 1) {
                    log_file = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--log" => {
                if let Some(value) = args.get(idx + 1) {
                    log_filter = Some(value.clone());
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    LaunchOptions {
        seed,
        auto_perform_json,
        log_file,
        log_filter,
    }
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "wildpile-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_launch_flags() {
        let options = parse_options(&args(&[
            "--seed",
            "42",
            "--auto-json",
            "script.json",
            "--log-file",
            "ui.log",
            "--log",
            "debug",
        ]));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.auto_perform_json, Some(PathBuf::from("script.json")));
        assert_eq!(options.log_file, Some(PathBuf::from("ui.log")));
        assert_eq!(options.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_seed_is_ignored() {
        let options = parse_options(&args(&["--seed", "soon"]));
        assert_eq!(options.seed, None);
    }
}
