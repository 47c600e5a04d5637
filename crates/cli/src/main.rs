use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wildpile_core::{
    EventBus, Game, GameConfig, Outcome, Selection, Snapshot, GRID_SLOTS, HAND_SLOTS,
    TOTAL_CARDS,
};
use wildpile_cui::{
    format_card, format_event, load_auto_perform_file, slot_text, LaunchOptions, ScriptAction,
};

const DEFAULT_SHELL_LOG: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    cui: bool,
    json: bool,
    seed: Option<u64>,
    auto_perform_json: Option<PathBuf>,
    log_filter: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Action(ScriptAction),
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Serialize)]
struct JsonReply<'a> {
    command: &'a str,
    ok: bool,
    message: String,
    snapshot: Snapshot,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        seed: std::env::var("WILDPILE_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok()),
        log_filter: std::env::var("WILDPILE_LOG").ok(),
        log_file: std::env::var_os("WILDPILE_LOG_FILE").map(PathBuf::from),
        ..CliOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--cui" => options.cui = true,
            "--json" => options.json = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--auto-perform-json" | "--auto-json" => {
                if let Some(value) = args.get(idx + 1) {
                    options.auto_perform_json = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--log" => {
                if let Some(value) = args.get(idx + 1) {
                    options.log_filter = Some(value.clone());
                    idx += 1;
                }
            }
            "--log-file" => {
                if let Some(value) = args.get(idx + 1) {
                    options.log_file = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.cui {
        let launch = LaunchOptions {
            seed: options.seed,
            auto_perform_json: options.auto_perform_json,
            log_file: options.log_file,
            log_filter: options.log_filter,
        };
        if let Err(err) = wildpile_cui::run(launch) {
            eprintln!("cui launch error: {err:#}");
            std::process::exit(1);
        }
        return;
    }
    init_stderr_logging(options.log_filter.as_deref().unwrap_or(DEFAULT_SHELL_LOG));
    if let Err(err) = run_shell(&options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_stderr_logging(filter: &str) {
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
    if let Err(err) = installed {
        eprintln!("log warning: {err}");
    }
}

fn run_shell(options: &CliOptions) -> Result<(), String> {
    let mut seed = options.seed;
    let mut script = Vec::new();
    if let Some(path) = options.auto_perform_json.as_ref() {
        let loaded = load_auto_perform_file(path)
            .map_err(|err| format!("load auto perform json from {}: {err}", path.display()))?;
        if seed.is_none() {
            seed = loaded.seed;
        }
        script = loaded.actions;
    }

    let mut events = EventBus::default();
    let mut game = Game::new(&GameConfig { seed }, &mut events);
    let interactive = io::stdin().is_terminal();
    if !options.json {
        if interactive {
            print_help();
        }
        drain_events(&mut events);
    }

    for action in script {
        let line = action.to_string();
        execute(&mut game, &mut events, Command::Action(action), &line, options.json);
    }
    if !options.json {
        print_board(&game.snapshot());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        if interactive {
            write_prompt(&mut io::stdout(), &game.snapshot()).map_err(|err| err.to_string())?;
        }
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => return Err(err.to_string()),
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                warn!(%line, %err, "unrecognised command");
                println!("{err} (type 'help')");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(&mut game, &mut events, command, line, options.json);
    }
    Ok(())
}

fn execute(game: &mut Game, events: &mut EventBus, command: Command, line: &str, json: bool) {
    let result = match command {
        Command::Quit => return,
        Command::Help => {
            print_help();
            return;
        }
        Command::Show if !json => {
            print_board(&game.snapshot());
            return;
        }
        Command::Json | Command::Show => Ok("snapshot".to_string()),
        Command::Action(action) => {
            debug!(%action, "shell action");
            match action.apply(game, events) {
                Ok(Some(accepted)) => Ok(format!("{accepted:?}")),
                Ok(None) => Ok("new game".to_string()),
                Err(err) => Err(err.to_string()),
            }
        }
    };

    if json || command == Command::Json {
        let _ = events.drain().count();
        let (ok, message) = match result {
            Ok(message) => (true, message),
            Err(message) => (false, message),
        };
        let reply = JsonReply {
            command: line,
            ok,
            message,
            snapshot: game.snapshot(),
        };
        match serde_json::to_string(&reply) {
            Ok(body) => println!("{body}"),
            Err(err) => eprintln!("serialize error: {err}"),
        }
        return;
    }

    if let Err(message) = result {
        println!("no move: {message}");
    }
    drain_events(events);
    print_board(&game.snapshot());
}

fn parse_command(line: &str) -> Result<Command, String> {
    let cmd = line.split_whitespace().next().unwrap_or("");
    match cmd {
        "show" | "board" | "s" => Ok(Command::Show),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => line.parse::<ScriptAction>().map(Command::Action),
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("event: {}", format_event(&event));
    }
}

fn prompt_text(snapshot: &Snapshot) -> String {
    match (snapshot.outcome, snapshot.current) {
        (Outcome::InProgress, Some(card)) => format!("[{}] > ", format_card(&card)),
        (Outcome::InProgress, None) => "> ".to_string(),
        (Outcome::Won, _) => "[won] > ".to_string(),
        (Outcome::Lost, _) => "[lost] > ".to_string(),
    }
}

fn write_prompt(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    write!(out, "{}", prompt_text(snapshot))?;
    out.flush()
}

fn render_board(snapshot: &Snapshot) -> Vec<String> {
    let mark = |selected: bool| if selected { "*" } else { "" };
    let piles: Vec<String> = (0..GRID_SLOTS)
        .map(|idx| {
            format!(
                "{idx}:{}{}",
                mark(snapshot.selection == Selection::Grid(idx)),
                slot_text(snapshot.grid[idx])
            )
        })
        .collect();
    let hand: Vec<String> = (0..HAND_SLOTS)
        .map(|idx| {
            format!(
                "{idx}:{}{}",
                mark(snapshot.selection == Selection::Hand(idx)),
                slot_text(snapshot.hand[idx])
            )
        })
        .collect();
    let mut lines = vec![
        format!(
            "deck {} | current {} | seed {}",
            snapshot.deck_len,
            slot_text(snapshot.current),
            snapshot.seed
        ),
        format!("piles  {}", piles.join("  ")),
        format!("hand   {}", hand.join("  ")),
    ];
    match snapshot.outcome {
        Outcome::InProgress => {}
        Outcome::Won => lines.push(format!(
            "You Win! Congratulations! You successfully placed all {TOTAL_CARDS} cards. ('new' to play again)"
        )),
        Outcome::Lost => lines.push(
            "Game Over. Your hand is full and you have no valid moves for the drawn card. ('new' to restart)"
                .to_string(),
        ),
    }
    lines
}

fn print_board(snapshot: &Snapshot) {
    for line in render_board(snapshot) {
        println!("{line}");
    }
}

fn print_help() {
    println!("commands:");
    println!("  draw | d               draw the top card of the deck");
    println!("  grid N | g N           play the pending card onto pile N, or select pile N (0-9)");
    println!("  hand N | h N           keep the drawn card in hand slot N, or select it (0-4)");
    println!("  new | restart | r      deal a new game");
    println!("  show | board | s       print the board");
    println!("  json                   print the board as JSON");
    println!("  help | ?               this text");
    println!("  quit | exit | q        leave");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildpile_core::{Card, Layout, Rank, Suit};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_cli_flags() {
        let options = parse_cli_options(&args(&["--json", "--seed", "7", "--log", "debug"]));
        assert!(options.json);
        assert!(!options.cui);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.log_filter.as_deref(), Some("debug"));

        let options = parse_cli_options(&args(&["--cui", "--auto-json", "moves.json"]));
        assert!(options.cui);
        assert_eq!(options.auto_perform_json, Some(PathBuf::from("moves.json")));
    }

    #[test]
    fn parses_shell_commands() {
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("json"), Ok(Command::Json));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(
            parse_command("g 3"),
            Ok(Command::Action(ScriptAction::Grid { index: 3 }))
        );
        assert_eq!(
            parse_command("d"),
            Ok(Command::Action(ScriptAction::Draw))
        );
        assert!(parse_command("fly").is_err());
    }

    #[test]
    fn board_marks_selection_and_outcome() {
        let mut layout = Layout {
            deck: vec![Card::wild()],
            ..Layout::default()
        };
        layout.grid[2] = Some(Card::standard(Suit::Hearts, Rank::Ace));
        let mut game = Game::from_layout(layout, &GameConfig::seeded(5));
        let mut events = EventBus::default();
        game.select_grid_slot(2, &mut events).expect("select");

        let lines = render_board(&game.snapshot());
        assert_eq!(lines[0], "deck 1 | current -- | seed 5");
        assert!(lines[1].contains("2:*A♥"));
        assert!(lines[1].contains("0:--"));
        assert_eq!(lines.len(), 3);

        let won = Game::from_layout(Layout::default(), &GameConfig::seeded(5));
        let lines = render_board(&won.snapshot());
        assert!(lines[3].starts_with("You Win!"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn prompt_write_failures_are_reported() {
        let mut events = EventBus::default();
        let game = Game::new(&GameConfig::seeded(1), &mut events);
        let mut out = Vec::new();
        write_prompt(&mut out, &game.snapshot()).expect("prompt");
        assert_eq!(out, b"> ");

        let err = write_prompt(&mut ClosedPipe, &game.snapshot()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn prompt_shows_the_drawn_card() {
        let mut events = EventBus::default();
        let mut game = Game::new(&GameConfig::seeded(1), &mut events);
        assert_eq!(prompt_text(&game.snapshot()), "> ");
        game.draw_card(&mut events).expect("draw");
        assert!(prompt_text(&game.snapshot()).starts_with('['));
    }
}
