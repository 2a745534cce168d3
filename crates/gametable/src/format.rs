//! Text formats tables are read from and written to.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Toml, Format::Yaml];

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Yaml => "yaml",
        }
    }

    /// Format named by a file extension, case-insensitive; `yml` is YAML
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        if extension == "yml" {
            return Some(Format::Yaml);
        }
        Format::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

/// Parse `text` as JSON, then TOML, then YAML; the first success wins
pub fn load<T: DeserializeOwned>(text: &str) -> Result<(T, Format), TableError> {
    let json = match serde_json::from_str(text) {
        Ok(value) => return Ok((value, Format::Json)),
        Err(err) => err.to_string(),
    };
    let toml = match toml::from_str(text) {
        Ok(value) => return Ok((value, Format::Toml)),
        Err(err) => err.to_string(),
    };
    let yaml = match serde_yaml::from_str(text) {
        Ok(value) => return Ok((value, Format::Yaml)),
        Err(err) => err.to_string(),
    };
    debug!(%json, %toml, %yaml, "no format accepted table text");
    Err(TableError::Unrecognized { json, toml, yaml })
}

/// Parse `text` in one known format
pub fn load_as<T: DeserializeOwned>(text: &str, format: Format) -> Result<T, TableError> {
    let parsed = match format {
        Format::Json => serde_json::from_str(text).map_err(|err| err.to_string()),
        Format::Toml => toml::from_str(text).map_err(|err| err.to_string()),
        Format::Yaml => serde_yaml::from_str(text).map_err(|err| err.to_string()),
    };
    parsed.map_err(|message| TableError::Parse { format, message })
}

/// Read a file, trusting its extension when it names a format
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<(T, Format), TableError> {
    let text = std::fs::read_to_string(path)?;
    match Format::from_path(path) {
        Some(format) => {
            debug!(path = %path.display(), %format, "loading table file");
            load_as(&text, format).map(|value| (value, format))
        }
        None => load(&text),
    }
}

pub fn serialize<T: Serialize>(value: &T, format: Format) -> Result<String, TableError> {
    let written = match format {
        Format::Json => serde_json::to_string_pretty(value).map_err(|err| err.to_string()),
        Format::Toml => toml::to_string_pretty(value).map_err(|err| err.to_string()),
        Format::Yaml => serde_yaml::to_string(value).map_err(|err| err.to_string()),
    };
    written.map_err(|message| TableError::Serialize { format, message })
}
