use std::fmt;

use serde::{Deserialize, Serialize};

/// Zone identifier as it appears in the catalog document.
///
/// The upstream JSON is inconsistent about ids (`12` vs `"12"`), so the id is
/// normalized to its string form on load. Numeric comparisons go through
/// [`ZoneId::numeric`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawZoneId", into = "String")]
pub struct ZoneId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawZoneId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawZoneId> for ZoneId {
    fn from(raw: RawZoneId) -> Self {
        match raw {
            RawZoneId::Int(n) => Self(n.to_string()),
            RawZoneId::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Self((f as i64).to_string())
            }
            RawZoneId::Float(f) => Self(f.to_string()),
            RawZoneId::Text(s) => Self(s.trim().to_string()),
        }
    }
}

impl From<ZoneId> for String {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

impl ZoneId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the id, if it has one.
    pub fn numeric(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }

    /// Loose equality against an externally supplied id (e.g. a URL query
    /// parameter): exact string match after trimming, or equal integer values.
    pub fn loosely_matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            return false;
        }
        if self.0 == raw {
            return true;
        }
        match (self.numeric(), raw.parse::<i64>().ok()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ZoneId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<i32> for ZoneId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One entry of the zone catalog. Extra fields in the source document are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub name: String,
}

impl ZoneRecord {
    pub fn new(id: impl Into<ZoneId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Parse the catalog document (a JSON array of zone objects).
pub fn parse_catalog(raw: &str) -> Result<Vec<ZoneRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_normalize_numbers_and_strings() {
        let zones = parse_catalog(
            r#"[{"id":1,"name":"Alpha"},{"id":"2","name":"Beta"},{"id":3.0,"name":"Gamma"}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let zones =
            parse_catalog(r#"[{"id":7,"name":"Seven","author":"x","cover":"c.png"}]"#).unwrap();
        assert_eq!(zones, vec![ZoneRecord::new(7, "Seven")]);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(parse_catalog(r#"{"id":1}"#).is_err());
        assert!(parse_catalog(r#"[{"name":"no id"}]"#).is_err());
    }

    #[test]
    fn loose_matching_coerces_numbers() {
        let id = ZoneId::from(2);
        assert!(id.loosely_matches("2"));
        assert!(id.loosely_matches(" 02 "));
        assert!(!id.loosely_matches("3"));
        assert!(!id.loosely_matches(""));

        let text = ZoneId::new("abc");
        assert!(text.loosely_matches("abc"));
        assert!(!text.loosely_matches("ABC"));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&ZoneRecord::new(5, "Five")).unwrap();
        assert_eq!(json, r#"{"id":"5","name":"Five"}"#);
    }
}
