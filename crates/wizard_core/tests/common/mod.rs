#![allow(dead_code)]

use std::sync::Once;

use url::Url;
use wizard_core::{update, Effect, Field, FormLayout, Msg, WizardSession};

pub const ACTION: &str = "https://example.com/register/U024BE7LH";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wizard_logging::initialize_for_tests);
}

pub fn new_session() -> WizardSession {
    WizardSession::new(FormLayout::default(), Url::parse(ACTION).unwrap())
}

pub fn set(state: WizardSession, field: Field, value: &str) -> WizardSession {
    let (state, effects) = update(
        state,
        Msg::FieldChanged {
            field,
            value: value.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn fill(mut state: WizardSession, values: &[(Field, &str)]) -> WizardSession {
    for &(field, value) in values {
        state = set(state, field, value);
    }
    state
}

pub const PERSONAL: &[(Field, &str)] = &[
    (Field::Name, "Ada Lovelace"),
    (Field::Birthday, "1990-12-10"),
    (Field::Email, "ada@example.com"),
    (Field::Phone, "5551234567"),
    (Field::AddressStreet, "1 Infinite Loop"),
    (Field::AddressCity, "Cupertino"),
    (Field::AddressState, "CA"),
    (Field::AddressZip, "95014"),
];

pub const IDENTITY_SSN: &[(Field, &str)] = &[(Field::Ssn, "1234")];

pub const BANK: &[(Field, &str)] = &[
    (Field::AccountNumber, "12345678"),
    (Field::RoutingNumber, "123456789"),
];

/// Selects an ID file and returns the upload id from the emitted effect.
pub fn select_file(state: WizardSession, name: &str) -> (WizardSession, u64) {
    let (state, effects) = update(
        state,
        Msg::FileSelected {
            path: format!("/tmp/uploads/{name}").into(),
        },
    );
    let upload_id = match effects.as_slice() {
        [Effect::EncodeFile { upload_id, .. }] => *upload_id,
        other => panic!("expected a single encode effect, got {other:?}"),
    };
    (state, upload_id)
}

pub fn encoded(state: WizardSession, upload_id: u64, data_url: &str) -> (WizardSession, Vec<Effect>) {
    update(
        state,
        Msg::FileEncoded {
            upload_id,
            data_url: data_url.to_string(),
        },
    )
}

/// Drives a fresh session to the last step with every field valid and the ID encoded.
pub fn ready_to_submit() -> WizardSession {
    let state = fill(new_session(), PERSONAL);
    let (state, _) = update(state, Msg::NextClicked);
    let state = fill(state, IDENTITY_SSN);
    let (state, upload_id) = select_file(state, "passport.png");
    let (state, _) = encoded(state, upload_id, "data:image/png;base64,iVBORw0K");
    let (state, _) = update(state, Msg::NextClicked);
    let state = fill(state, BANK);
    assert!(state.is_last_step());
    state
}
