use wizard_core::{Field, Msg};

use super::constants::*;
use crate::platform::AppEvent;

/// Parses one console line into an event for the main loop.
pub fn parse_line(line: &str) -> AppEvent {
    let line = line.trim();
    if line.is_empty() {
        return AppEvent::Msg(Msg::NoOp);
    }

    if line.starts_with(':') {
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        return parse_command(command, argument);
    }

    match line.split_once('=') {
        Some((key, value)) => {
            let key = key.trim();
            match Field::from_key(key) {
                Some(Field::GovtId) => {
                    AppEvent::Unrecognized(format!("use `{CMD_FILE} <path>` to select the photo ID"))
                }
                Some(field) => AppEvent::Msg(Msg::FieldChanged {
                    field,
                    value: value.trim().to_string(),
                }),
                None => AppEvent::Unrecognized(format!("unknown field `{key}`")),
            }
        }
        None => AppEvent::Unrecognized(format!("expected `field = value`, got `{line}`")),
    }
}

fn parse_command(command: &str, argument: &str) -> AppEvent {
    match command {
        CMD_NEXT => AppEvent::Msg(Msg::NextClicked),
        CMD_BACK => AppEvent::Msg(Msg::BackClicked),
        CMD_SUBMIT => AppEvent::Msg(Msg::SubmitClicked),
        CMD_HELP => AppEvent::Help,
        CMD_QUIT => AppEvent::Quit,
        CMD_EDIT => match argument.parse::<usize>() {
            Ok(step) if step >= 1 => AppEvent::Msg(Msg::EditClicked { step: step - 1 }),
            _ => AppEvent::Unrecognized(format!("`{CMD_EDIT}` takes a step number starting at 1")),
        },
        CMD_FILE if !argument.is_empty() => AppEvent::Msg(Msg::FileSelected {
            path: argument.into(),
        }),
        CMD_PLACE if !argument.is_empty() => AppEvent::SelectPlace(argument.to_string()),
        CMD_FILE | CMD_PLACE => AppEvent::Unrecognized(format!("`{command}` needs an argument")),
        _ => AppEvent::Unrecognized(format!("unknown command `{command}`")),
    }
}
