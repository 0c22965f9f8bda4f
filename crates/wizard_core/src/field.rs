use std::collections::BTreeMap;

use serde::Deserialize;

/// Every input the registration form can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Birthday,
    Email,
    Phone,
    /// Single-input address, used instead of the itemized fields in some layouts.
    Address,
    AddressStreet,
    AddressCity,
    AddressState,
    AddressZip,
    Ssn,
    /// Government ID upload; the value is the selected file's name.
    GovtId,
    AccountNumber,
    RoutingNumber,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Name,
        Field::Birthday,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::AddressStreet,
        Field::AddressCity,
        Field::AddressState,
        Field::AddressZip,
        Field::Ssn,
        Field::GovtId,
        Field::AccountNumber,
        Field::RoutingNumber,
    ];

    /// Form key used both for input lookup and in the submitted payload.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Birthday => "birthday",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::AddressStreet => "address_street",
            Field::AddressCity => "address_city",
            Field::AddressState => "address_state",
            Field::AddressZip => "address_zip",
            Field::Ssn => "ssn",
            Field::GovtId => "govt_id",
            Field::AccountNumber => "account_number",
            Field::RoutingNumber => "routing_number",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Full name",
            Field::Birthday => "Date of birth",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::AddressStreet => "Street",
            Field::AddressCity => "City",
            Field::AddressState => "State",
            Field::AddressZip => "ZIP",
            Field::Ssn => "SSN",
            Field::GovtId => "Photo ID",
            Field::AccountNumber => "Account number",
            Field::RoutingNumber => "Routing number",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Current string value of each form input. Missing entries read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet {
    values: BTreeMap<Field, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }
}

impl<S: Into<String>> FromIterator<(Field, S)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (Field, S)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(field, value)| (field, value.into()))
                .collect(),
        }
    }
}

/// Which address inputs the personal step carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AddressMode {
    #[default]
    Itemized,
    SingleField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLayout {
    pub title: String,
    pub fields: Vec<Field>,
}

impl StepLayout {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// Ordered steps of the wizard. Always holds at least one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    steps: Vec<StepLayout>,
}

impl FormLayout {
    /// Returns `None` for an empty step list.
    pub fn new(steps: Vec<StepLayout>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    /// The three-step registration form: personal details, identity, bank account.
    pub fn registration(mode: AddressMode) -> Self {
        let mut personal = vec![Field::Name, Field::Birthday, Field::Email, Field::Phone];
        match mode {
            AddressMode::Itemized => personal.extend([
                Field::AddressStreet,
                Field::AddressCity,
                Field::AddressState,
                Field::AddressZip,
            ]),
            AddressMode::SingleField => personal.push(Field::Address),
        }

        Self {
            steps: vec![
                StepLayout::new("Personal details", personal),
                StepLayout::new("Identity", vec![Field::Ssn, Field::GovtId]),
                StepLayout::new(
                    "Bank account",
                    vec![Field::AccountNumber, Field::RoutingNumber],
                ),
            ],
        }
    }

    pub fn steps(&self) -> &[StepLayout] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepLayout> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields().any(|candidate| candidate == field)
    }

    /// All fields in step order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.steps.iter().flat_map(|step| step.fields.iter().copied())
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self::registration(AddressMode::default())
    }
}
