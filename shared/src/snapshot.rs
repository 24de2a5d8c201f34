//! Text format for exporting and importing browser storage.
//!
//! A snapshot file is the JSON object of local storage entries, the delimiter
//! `"\n\n|\n\n"`, then the raw cookie string (`a=1; b=2`). Cookie attributes
//! such as domain and path are not captured.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

pub const SECTION_DELIMITER: &str = "\n\n|\n\n";
pub const FILE_EXTENSION: &str = "data";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSnapshot {
    pub entries: BTreeMap<String, String>,
    pub cookies: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The storage section is not a JSON object of strings.
    Storage(String),
    /// The file has no cookie section.
    MissingCookies,
    /// A cookie piece without `name=value`.
    Cookie(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(reason) => write!(f, "could not read saved storage: {reason}"),
            Self::MissingCookies => f.write_str("file has no cookie section"),
            Self::Cookie(piece) => write!(f, "skipped malformed cookie: {piece}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Result of decoding a snapshot file. Whatever parsed is restorable even when
/// `errors` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries: Option<BTreeMap<String, String>>,
    pub cookies: Vec<String>,
    pub errors: Vec<ImportError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StorageSnapshot {
    pub fn encode(&self) -> String {
        // A map of strings always serializes.
        let storage = serde_json::to_string(&self.entries).unwrap_or_else(|_| "{}".to_string());
        format!("{storage}{SECTION_DELIMITER}{}", self.cookies)
    }

    pub fn decode(text: &str) -> ImportReport {
        let mut report = ImportReport::default();
        let (storage, cookies) = match text.split_once(SECTION_DELIMITER) {
            Some((storage, cookies)) => (storage, Some(cookies)),
            None => (text, None),
        };

        match parse_storage(storage) {
            Ok(entries) => report.entries = Some(entries),
            Err(reason) => report.errors.push(ImportError::Storage(reason)),
        }

        match cookies {
            Some(cookies) => {
                for piece in cookie_pieces(cookies) {
                    if valid_cookie(piece) {
                        report.cookies.push(piece.to_string());
                    } else {
                        report.errors.push(ImportError::Cookie(piece.to_string()));
                    }
                }
            }
            None => report.errors.push(ImportError::MissingCookies),
        }

        report
    }
}

/// Storage values are strings in the browser; other JSON scalars written by
/// older exports are kept as their JSON text.
fn parse_storage(raw: &str) -> Result<BTreeMap<String, String>, String> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).map_err(|e| e.to_string())?;
    let serde_json::Value::Object(object) = value else {
        return Err("expected a JSON object".to_string());
    };
    Ok(object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

fn cookie_pieces(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(';').map(str::trim).filter(|piece| !piece.is_empty())
}

fn valid_cookie(piece: &str) -> bool {
    piece
        .split_once('=')
        .is_some_and(|(name, _)| !name.trim().is_empty())
}

/// Parse a `document.cookie` string into name/value pairs.
pub fn parse_cookie_string(raw: &str) -> BTreeMap<String, String> {
    cookie_pieces(raw)
        .filter_map(|piece| piece.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

/// Download name for an export made at `now`: `<unix millis>.data`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("{}.{FILE_EXTENSION}", now.timestamp_millis())
}
