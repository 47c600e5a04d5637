use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use wildpile_core::{Accepted, EventBus, Game, MoveRejected};

/// One player gesture, as written in auto-perform scripts and typed at the
/// command shell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Draw,
    Grid { index: usize },
    Hand { index: usize },
    Restart,
}

impl ScriptAction {
    /// Applies the gesture. Restart never fails and reports no `Accepted`.
    pub fn apply(
        self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<Option<Accepted>, MoveRejected> {
        match self {
            Self::Draw => game.draw_card(events).map(Some),
            Self::Grid { index } => game.select_grid_slot(index, events).map(Some),
            Self::Hand { index } => game.select_hand_slot(index, events).map(Some),
            Self::Restart => {
                game.start_game(events);
                Ok(None)
            }
        }
    }
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => f.write_str("draw"),
            Self::Grid { index } => write!(f, "grid {index}"),
            Self::Hand { index } => write!(f, "hand {index}"),
            Self::Restart => f.write_str("restart"),
        }
    }
}

impl FromStr for ScriptAction {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let cmd = parts.next().ok_or_else(|| "empty command".to_string())?;
        let mut index = || -> Result<usize, String> {
            let raw = parts
                .next()
                .ok_or_else(|| format!("'{cmd}' needs a slot index"))?;
            raw.parse::<usize>()
                .map_err(|_| format!("invalid index '{raw}'"))
        };
        match cmd {
            "draw" | "d" => Ok(Self::Draw),
            "grid" | "g" => Ok(Self::Grid { index: index()? }),
            "hand" | "h" => Ok(Self::Hand { index: index()? }),
            "restart" | "new" | "r" => Ok(Self::Restart),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoPerformScript {
    pub seed: Option<u64>,
    pub actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, Deserialize)]
struct AutoPerformScriptFile {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AutoPerformPayload {
    Script(AutoPerformScriptFile),
    Actions(Vec<ScriptAction>),
}

pub fn parse_auto_perform(body: &str) -> Result<AutoPerformScript, String> {
    let payload: AutoPerformPayload = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let script = match payload {
        AutoPerformPayload::Script(script) => AutoPerformScript {
            seed: script.seed,
            actions: script.actions,
        },
        AutoPerformPayload::Actions(actions) => AutoPerformScript {
            seed: None,
            actions,
        },
    };
    Ok(script)
}

pub fn load_auto_perform_file(path: &Path) -> Result<AutoPerformScript, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    parse_auto_perform(&body)
}
