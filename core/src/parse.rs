//! Textual form of [`Command`] used by scripted sessions.

use std::str::FromStr;

use thiserror::Error;

use crate::{CardId, Command, TileId};

/// Reasons a line of text could not be turned into a [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandParseError {
    /// The line contained no action name.
    #[error("no action given")]
    Empty,
    /// The action name does not match any known command.
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    /// The action requires an argument that was not supplied.
    #[error("{action} requires a {argument} argument")]
    MissingArgument {
        /// Action being parsed.
        action: &'static str,
        /// Description of the missing argument.
        argument: &'static str,
    },
    /// An argument could not be interpreted.
    #[error("{action} cannot use '{value}' as its argument")]
    InvalidArgument {
        /// Action being parsed.
        action: &'static str,
        /// Text that failed to parse.
        value: String,
    },
    /// More arguments were supplied than the action accepts.
    #[error("{action} does not accept the extra argument '{value}'")]
    UnexpectedArgument {
        /// Action being parsed.
        action: &'static str,
        /// First surplus argument.
        value: String,
    },
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CommandParseError::Empty)?;

        let command = match name {
            "generateMap" => Command::GenerateMap,
            "focusHex" => Command::FocusHex {
                tile: TileId::new(id_argument("focusHex", "tile id", tokens.next())?),
            },
            "selectFocusedHex" => Command::SelectFocusedHex,
            "setMapPanning" => Command::SetMapPanning {
                panning: bool_argument("setMapPanning", tokens.next())?,
            },
            "setMapZooming" => Command::SetMapZooming {
                zooming: bool_argument("setMapZooming", tokens.next())?,
            },
            "moveShipToSelectedTile" => Command::MoveShipToSelectedTile,
            "dropShipCard" => Command::DropShipCard {
                card: CardId::new(id_argument("dropShipCard", "card id", tokens.next())?),
            },
            "destroyShipCard" => Command::DestroyShipCard {
                card: CardId::new(id_argument("destroyShipCard", "card id", tokens.next())?),
            },
            "startTurn" => Command::StartTurn,
            other => return Err(CommandParseError::UnknownAction(other.to_owned())),
        };

        if let Some(extra) = tokens.next() {
            return Err(CommandParseError::UnexpectedArgument {
                action: command.name(),
                value: extra.to_owned(),
            });
        }

        Ok(command)
    }
}

fn id_argument(
    action: &'static str,
    argument: &'static str,
    token: Option<&str>,
) -> Result<u32, CommandParseError> {
    let token = token.ok_or(CommandParseError::MissingArgument { action, argument })?;
    token
        .parse::<u32>()
        .map_err(|_| CommandParseError::InvalidArgument {
            action,
            value: token.to_owned(),
        })
}

fn bool_argument(action: &'static str, token: Option<&str>) -> Result<bool, CommandParseError> {
    let token = token.ok_or(CommandParseError::MissingArgument {
        action,
        argument: "boolean",
    })?;
    match token {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(CommandParseError::InvalidArgument {
            action,
            value: token.to_owned(),
        }),
    }
}
