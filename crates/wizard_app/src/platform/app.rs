use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use wizard_core::{update, Msg, Place, SubmissionState, WizardSession};
use wizard_logging::{wizard_info, wizard_warn};

use super::config::{self, DEFAULT_CONFIG_PATH};
use super::effects::EffectRunner;
use super::ui::console::{ConsoleSurface, FormSurface};
use super::ui::constants::HELP_TEXT;
use super::ui::input::parse_line;
use super::ui::render::render;
use super::{logging, AppEvent};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = config::load(&config_path)?;
    logging::initialize(config.log);
    wizard_info!(
        "Config {} action={} address_mode={:?}",
        config_path.display(),
        config.action_url,
        config.address_mode
    );

    let mut session = WizardSession::new(config.layout(), config.action()?);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.engine_settings(), event_tx.clone());
    spawn_stdin_reader(event_tx);

    let mut surface = ConsoleSurface::new(io::stdout());
    surface.notice("Registration. Type :help for commands.")?;
    session.consume_dirty();
    surface.apply_all(render(&session.view()))?;

    let mut input_closed = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                session = dispatch(session, msg, &runner, &mut surface)?;
            }
            AppEvent::SelectPlace(argument) => match parse_place(&argument) {
                Ok(place) => {
                    session = dispatch(session, Msg::PlaceSelected(place), &runner, &mut surface)?;
                }
                Err(err) => {
                    wizard_warn!("Place rejected: {:#}", err);
                    surface.notice(&format!("Could not use place: {err:#}"))?;
                }
            },
            AppEvent::Help => surface.notice(HELP_TEXT)?,
            AppEvent::Unrecognized(reason) => surface.notice(&format!("? {reason}"))?,
            AppEvent::Quit => {
                wizard_info!("Quit requested");
                break;
            }
            AppEvent::InputClosed => input_closed = true,
        }

        if input_closed && is_settled(&session) {
            wizard_info!("Input closed; exiting");
            break;
        }
    }

    Ok(())
}

fn dispatch<S: FormSurface>(
    session: WizardSession,
    msg: Msg,
    runner: &EffectRunner,
    surface: &mut S,
) -> anyhow::Result<WizardSession> {
    let (mut session, effects) = update(session, msg);
    runner.enqueue(effects);
    if session.consume_dirty() {
        surface
            .apply_all(render(&session.view()))
            .context("failed to render the form")?;
    }
    Ok(session)
}

fn is_settled(session: &WizardSession) -> bool {
    session.submission() == SubmissionState::Idle && !session.is_encoding()
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(parse_line(&line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Accepts a place as inline JSON or as a path to a JSON file.
fn parse_place(argument: &str) -> anyhow::Result<Place> {
    let json = if argument.starts_with('{') {
        argument.to_string()
    } else {
        fs::read_to_string(argument).with_context(|| format!("failed to read {argument}"))?
    };
    serde_json::from_str(&json).context("not a place object")
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    const PLACE_JSON: &str = r#"{"address_components": [
        {"short_name": "1", "long_name": "1"},
        {"short_name": "Market St", "long_name": "Market Street"},
        {"short_name": "SoMa", "long_name": "South of Market"},
        {"short_name": "SF", "long_name": "San Francisco"},
        {"short_name": "SF County", "long_name": "San Francisco County"},
        {"short_name": "CA", "long_name": "California"},
        {"short_name": "US", "long_name": "United States"},
        {"short_name": "94105", "long_name": "94105"}
    ]}"#;

    #[test]
    fn inline_place_json_is_parsed() {
        let place = parse_place(PLACE_JSON).unwrap();
        let address = wizard_core::resolve_address(&place);
        assert_eq!(address.street, "1 Market St");
        assert_eq!(address.city, "San Francisco");
        assert_eq!(address.zip, "94105");
    }

    #[test]
    fn place_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("place.json");
        fs::write(&path, PLACE_JSON).unwrap();

        let place = parse_place(path.to_str().unwrap()).unwrap();
        assert_eq!(place.address_components.len(), 8);
    }

    #[test]
    fn failed_encode_lets_the_session_settle() {
        let session = WizardSession::new(
            wizard_core::FormLayout::default(),
            url::Url::parse("https://example.com/register/U1").unwrap(),
        );
        let (session, effects) = update(
            session,
            Msg::FileSelected {
                path: PathBuf::from("id.png"),
            },
        );
        let upload_id = match effects.as_slice() {
            [wizard_core::Effect::EncodeFile { upload_id, .. }] => *upload_id,
            other => panic!("expected an encode effect, got {other:?}"),
        };
        assert!(!is_settled(&session));

        let reason = wizard_engine::EncodeError::Unavailable("no threads".to_string());
        let (session, _) = update(
            session,
            Msg::FileEncodeFailed {
                upload_id,
                reason: reason.to_string(),
            },
        );
        assert!(is_settled(&session));
    }

    #[test]
    fn bad_place_arguments_are_errors() {
        assert!(parse_place("{not json").is_err());
        assert!(parse_place("/definitely/not/here.json").is_err());
    }
}
