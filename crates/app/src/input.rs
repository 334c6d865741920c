//! Parsing of interactive commands typed on stdin.

use rowdeck_application::{ListBody, Screen};
use rowdeck_domain::RecordId;
use rowdeck_ui::{Frame, TableCommand};
use thiserror::Error;

pub const HELP: &str =
    "commands: refresh | sort <key> | open <row> | back | delete [id] | yes | no | esc | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Refresh,
    Sort(String),
    Open(usize),
    Back,
    Delete(Option<String>),
    Yes,
    No,
    Escape,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("type a command ({HELP})")]
    Empty,

    #[error("unknown command {0:?} ({HELP})")]
    Unknown(String),

    #[error("{command} needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("not a row number: {0:?}")]
    InvalidRow(String),
}

/// Parses one input line.
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(InputError::Empty);
    };
    let argument = words.next();

    match command.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Ok(Input::Refresh),
        "sort" | "s" => argument
            .map(|key| Input::Sort(key.to_string()))
            .ok_or(InputError::MissingArgument {
                command: "sort",
                argument: "a column key",
            }),
        "open" | "o" => {
            let row = argument.ok_or(InputError::MissingArgument {
                command: "open",
                argument: "a row number",
            })?;
            row.parse()
                .map(Input::Open)
                .map_err(|_| InputError::InvalidRow(row.to_string()))
        }
        "back" | "b" => Ok(Input::Back),
        "delete" | "d" => Ok(Input::Delete(argument.map(str::to_string))),
        "yes" | "y" => Ok(Input::Yes),
        "no" | "n" => Ok(Input::No),
        "esc" | "escape" => Ok(Input::Escape),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(InputError::Unknown(other.to_string())),
    }
}

/// Maps input to a table command.
///
/// `delete <id>` matches the id against the rows of the last frame so that
/// text ids that look like numbers still hit the right record. Returns
/// `None` for inputs the driver handles itself.
pub fn to_command(input: Input, frame: Option<&Frame>) -> Option<TableCommand> {
    let command = match input {
        Input::Refresh => TableCommand::Refresh,
        Input::Sort(key) => TableCommand::SortBy(key),
        Input::Open(row) => TableCommand::SelectRow(row),
        Input::Back => TableCommand::Back,
        Input::Delete(None) => TableCommand::RequestDeleteSelected,
        Input::Delete(Some(typed)) => TableCommand::RequestDelete(resolve_id(&typed, frame)),
        Input::Yes => TableCommand::ConfirmDelete,
        Input::No => TableCommand::CancelDelete,
        Input::Escape => TableCommand::Escape,
        Input::Help | Input::Quit => return None,
    };
    Some(command)
}

fn resolve_id(typed: &str, frame: Option<&Frame>) -> RecordId {
    let shown = frame.and_then(|frame| match &frame.table.screen {
        Screen::List(list) => match &list.body {
            ListBody::Rows(rows) => rows
                .iter()
                .filter_map(|row| row.id.as_ref())
                .find(|id| id.to_string() == typed)
                .cloned(),
            ListBody::Loading(_) | ListBody::Empty(_) => None,
        },
        Screen::Detail(detail) => detail.id.clone().filter(|id| id.to_string() == typed),
    });

    shown.unwrap_or_else(|| {
        typed
            .parse::<i64>()
            .map_or_else(|_| RecordId::from(typed), RecordId::from)
    })
}
