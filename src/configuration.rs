use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::markup::breakpoint::MarkupInput;
use crate::markup::configurationerror::ConfigurationError;
use crate::markup::markuptable::MarkupTable;
use crate::math::round::PRICE_DIGITS;
use crate::store::markupstore::MarkupStore;
use crate::store::storeerror::StoreError;

/// The shop's standing markup matrix: `(cost limit, multiplier)`, `None` for
/// the open-ended top band.
const DEFAULT_MARKUP_MATRIX: [(Option<f64>, f64); 9] = [
    (Some(5.0), 3.0),
    (Some(10.0), 2.75),
    (Some(25.0), 2.0),
    (Some(100.0), 1.86),
    (Some(200.0), 1.52),
    (Some(250.0), 1.43),
    (Some(500.0), 1.34),
    (Some(1000.0), 1.26),
    (None, 1.21),
];

fn default_markup_matrix() -> Vec<MarkupInput> {
    DEFAULT_MARKUP_MATRIX
        .iter()
        .map(|&(value, multiplier)| MarkupInput::new(value, multiplier))
        .collect()
}

fn default_price_digits() -> u32 {
    PRICE_DIGITS
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default = "default_markup_matrix")]
    markup_matrix: Vec<MarkupInput>,
    #[serde(default = "default_price_digits")]
    price_digits: u32
}

pub struct Configuration {
    markup_matrix: Vec<MarkupInput>,
    price_digits: u32
}

impl Configuration {
    pub fn new(markup_matrix: Vec<MarkupInput>, price_digits: u32) -> Configuration {
        Configuration { markup_matrix, price_digits }
    }

    /// Reads `{ "markup_matrix": [...], "price_digits": 2 }`. Either field may
    /// be left out to take the built-in default.
    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, StoreError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Ok(Configuration::new(json_prop.markup_matrix, json_prop.price_digits))
    }

    pub fn markup_matrix(&self) -> &[MarkupInput] {
        &self.markup_matrix
    }

    pub fn price_digits(&self) -> u32 {
        self.price_digits
    }

    pub fn markup_table(&self) -> Result<MarkupTable, ConfigurationError> {
        MarkupTable::from_inputs(&self.markup_matrix)
    }

    /// A fresh store seeded with the configured matrix.
    pub fn markup_store(&self) -> Result<MarkupStore, StoreError> {
        MarkupStore::from_inputs(&self.markup_matrix)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration::new(default_markup_matrix(), default_price_digits())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_matrix_is_valid() {
        let config = Configuration::default();
        let table = config.markup_table().unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table.multiplier(1.0), 3.0);
        assert_eq!(table.multiplier(5000.0), 1.21);
        assert_eq!(config.price_digits(), 2);
    }

    #[test]
    fn reads_matrix_and_digits() {
        let file = config_file(r#"{
            "markup_matrix": [
                {"value": 20, "multiplier": 1},
                {"value": 10, "multiplier": 2}
            ],
            "price_digits": 3
        }"#);
        let config = Configuration::from_reader(file.path()).unwrap();
        assert_eq!(config.price_digits(), 3);
        assert_eq!(config.markup_table().unwrap().multiplier(15.0), 1.5);
        assert_eq!(config.markup_store().unwrap().list().len(), 2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let file = config_file("{}");
        let config = Configuration::from_reader(file.path()).unwrap();
        assert_eq!(config.markup_matrix(), Configuration::default().markup_matrix());
        assert_eq!(config.price_digits(), PRICE_DIGITS);
    }

    #[test]
    fn invalid_matrix_is_reported_on_use() {
        let file = config_file(r#"{"markup_matrix": [{"value": 5, "multiplier": 3}, {"value": 5, "multiplier": 2}]}"#);
        let config = Configuration::from_reader(file.path()).unwrap();
        assert_eq!(config.markup_table().err(), Some(ConfigurationError::DuplicateThreshold(5.0)));
        assert!(matches!(
            config.markup_store(),
            Err(StoreError::Configuration(ConfigurationError::DuplicateThreshold(_)))
        ));
    }
}
