use serde::Deserialize;

/// One entry of an autocomplete place's `address_components` list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub long_name: String,
}

impl AddressComponent {
    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
        }
    }
}

/// Place selected in the address autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressRecord {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressRecord {
    /// `street, city, state zip`, for single-input address layouts.
    /// Empty parts are left out along with their separators.
    pub fn one_line(&self) -> String {
        let region = join_present([self.state.as_str(), self.zip.as_str()], " ");
        join_present([self.street.as_str(), self.city.as_str(), region.as_str()], ", ")
    }
}

fn join_present<const N: usize>(parts: [&str; N], separator: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

const STREET_NUMBER: usize = 0;
const ROUTE: usize = 1;
const LOCALITY: usize = 3;
const ADMIN_AREA: usize = 5;
const POSTAL_CODE: usize = 7;

/// Extracts the address from the widget's component list.
///
/// The widget reports components positionally for street-level US results:
/// number, route, neighborhood, locality, county, state, country, postal code.
/// Any other shape yields partially empty fields rather than an error.
pub fn resolve_address(place: &Place) -> AddressRecord {
    let short = |index: usize| {
        place
            .address_components
            .get(index)
            .map(|component| component.short_name.as_str())
            .unwrap_or("")
    };
    let long = |index: usize| {
        place
            .address_components
            .get(index)
            .map(|component| component.long_name.as_str())
            .unwrap_or("")
    };

    let street = join_present([short(STREET_NUMBER), short(ROUTE)], " ");

    AddressRecord {
        street,
        city: long(LOCALITY).to_string(),
        state: short(ADMIN_AREA).to_string(),
        zip: short(POSTAL_CODE).to_string(),
    }
}
