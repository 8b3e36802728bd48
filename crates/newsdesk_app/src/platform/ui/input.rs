use newsdesk_core::{ClickTarget, Msg};
use thiserror::Error;

use super::constants::*;

/// What a line typed by the user asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Send(Msg),
    Help,
    Quit,
    /// Empty line; just redraw.
    Redraw,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("nieznane polecenie: {0} (wpisz help)")]
    Unknown(String),
    #[error("niepoprawny numer karty: {0}")]
    BadCardNumber(String),
}

pub fn parse_command(line: &str) -> Result<UiCommand, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let msg = match word {
        "" => return Ok(UiCommand::Redraw),
        CMD_HELP => return Ok(UiCommand::Help),
        CMD_QUIT => return Ok(UiCommand::Quit),
        CMD_RUN => Msg::RunClicked,
        CMD_EXPORT => Msg::ExportClicked,
        CMD_CLOSE => Msg::ModalCloseClicked,
        CMD_DISMISS => Msg::AlertDismissed,
        CMD_BACKDROP => Msg::ModalClicked {
            target: ClickTarget::Backdrop,
        },
        CMD_CONTENT => Msg::ModalClicked {
            target: ClickTarget::Content,
        },
        // The key is passed on untrimmed; the core decides what to keep.
        CMD_KEY => Msg::CredentialEdited(rest.to_string()),
        CMD_OPEN => {
            let number: usize = rest
                .trim()
                .parse()
                .map_err(|_| InputError::BadCardNumber(rest.trim().to_string()))?;
            if number == 0 {
                return Err(InputError::BadCardNumber(number.to_string()));
            }
            Msg::CardClicked { index: number - 1 }
        }
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(UiCommand::Send(msg))
}
