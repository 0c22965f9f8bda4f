use crate::{AddressRecord, Field, FieldSet, FormLayout};

/// Payload key carrying the encoded government ID.
pub const FILE_KEY: &str = "file";

/// Data URL (`data:<mime>;base64,...`) of the selected ID document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile(String);

impl EncodedFile {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered multipart text entries, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionPayload {
    entries: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, String)> {
        self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces an existing entry in place, or appends it.
    fn put(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(name, _)| name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// Builds the submission: every layout field in step order, then the resolved
/// address over whichever address inputs the layout has, then the encoded file.
pub fn build_payload(
    layout: &FormLayout,
    values: &FieldSet,
    address: Option<&AddressRecord>,
    file: &EncodedFile,
) -> SubmissionPayload {
    let mut payload = SubmissionPayload::default();
    for field in layout.fields() {
        payload.put(field.key(), values.get(field).to_string());
    }

    if let Some(address) = address {
        let resolved = [
            (Field::AddressStreet, address.street.clone()),
            (Field::AddressCity, address.city.clone()),
            (Field::AddressState, address.state.clone()),
            (Field::AddressZip, address.zip.clone()),
            (Field::Address, address.one_line()),
        ];
        for (field, value) in resolved {
            if layout.contains(field) {
                payload.put(field.key(), value);
            }
        }
    }

    payload.put(FILE_KEY, file.as_str().to_string());
    payload
}
