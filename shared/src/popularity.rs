use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::zone::ZoneId;

/// Download totals keyed by zone id (string form). Absent ids count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopularityMap {
    counts: HashMap<String, u64>,
}

impl PopularityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integer ids are looked up in canonical form, so `"007"` reads the
    /// same entry as `7`.
    pub fn get(&self, id: &ZoneId) -> u64 {
        let count = match id.numeric() {
            Some(n) => self.counts.get(n.to_string().as_str()),
            None => self.counts.get(id.as_str()),
        };
        count.copied().unwrap_or(0)
    }

    pub fn insert(&mut self, id: impl Into<String>, count: u64) {
        self.counts.insert(id.into(), count);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add(&mut self, id: &str, count: u64) {
        let slot = self.counts.entry(id.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for PopularityMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, count) in iter {
            map.insert(id, count);
        }
        map
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsDocument {
    #[serde(default)]
    pub files: Vec<FileStats>,
}

#[derive(Debug, Deserialize)]
pub struct FileStats {
    pub name: String,
    #[serde(default)]
    pub total: Option<serde_json::Value>,
    #[serde(default)]
    pub hits: Option<HitStats>,
}

#[derive(Debug, Deserialize)]
pub struct HitStats {
    #[serde(default)]
    pub total: Option<serde_json::Value>,
}

impl FileStats {
    fn download_total(&self) -> Option<u64> {
        self.total
            .as_ref()
            .or_else(|| self.hits.as_ref().and_then(|h| h.total.as_ref()))
            .and_then(serde_json::Value::as_u64)
    }
}

static ZONE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^zone-([0-9]+)\.[A-Za-z0-9]+$").expect("valid zone file pattern"));

/// Extract the zone id digits from a stats filename like `/zones/zone-12.html`.
pub fn zone_id_from_filename(name: &str) -> Option<&str> {
    let file = name.rsplit('/').next().unwrap_or(name);
    let caps = ZONE_FILE.captures(file)?;
    caps.get(1).map(|m| m.as_str())
}

/// Build the popularity map from a parsed stats document.
/// Files outside the `zone-<digits>.<ext>` pattern are skipped.
pub fn extract(doc: &StatsDocument) -> PopularityMap {
    let mut map = PopularityMap::new();
    for file in &doc.files {
        let Some(id) = zone_id_from_filename(&file.name) else {
            continue;
        };
        let Some(total) = file.download_total() else {
            continue;
        };
        // Leading zeros would never match a catalog id's canonical form.
        let id = id.trim_start_matches('0');
        map.add(if id.is_empty() { "0" } else { id }, total);
    }
    map
}

pub fn parse_stats(raw: &str) -> Result<PopularityMap, serde_json::Error> {
    let doc: StatsDocument = serde_json::from_str(raw)?;
    Ok(extract(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_pattern() {
        assert_eq!(zone_id_from_filename("zone-12.html"), Some("12"));
        assert_eq!(zone_id_from_filename("/zones/zone-7.png"), Some("7"));
        assert_eq!(zone_id_from_filename("zone-.html"), None);
        assert_eq!(zone_id_from_filename("zone-12"), None);
        assert_eq!(zone_id_from_filename("myzone-12.html"), None);
        assert_eq!(zone_id_from_filename("zone-12.html.bak"), None);
        assert_eq!(zone_id_from_filename("zone-1a.html"), None);
    }

    #[test]
    fn only_ascii_digits_form_an_id() {
        assert_eq!(zone_id_from_filename("zone-\u{0661}\u{0662}.html"), None);
        assert_eq!(zone_id_from_filename("zone-\u{FF11}.html"), None);
    }

    #[test]
    fn extracts_totals_from_both_shapes() {
        let map = parse_stats(
            r#"{"files":[
                {"name":"/zone-1.html","total":5},
                {"name":"/zone-2.html","hits":{"total":50}},
                {"name":"/index.html","total":999},
                {"name":"/zone-3.html","total":-4}
            ]}"#,
        )
        .unwrap();
        assert_eq!(map.get(&ZoneId::from(1)), 5);
        assert_eq!(map.get(&ZoneId::from(2)), 50);
        assert_eq!(map.get(&ZoneId::from(3)), 0);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn same_zone_across_extensions_is_summed() {
        let map = parse_stats(
            r#"{"files":[{"name":"zone-4.html","total":10},{"name":"zone-4.png","total":3}]}"#,
        )
        .unwrap();
        assert_eq!(map.get(&ZoneId::from(4)), 13);
    }

    #[test]
    fn leading_zeros_normalize() {
        let map = parse_stats(r#"{"files":[{"name":"zone-007.html","total":1}]}"#).unwrap();
        assert_eq!(map.get(&ZoneId::from(7)), 1);
        assert_eq!(map.get(&ZoneId::new("007")), 1);
        assert_eq!(map.get(&ZoneId::new("0007")), 1);
    }

    #[test]
    fn non_numeric_ids_are_looked_up_verbatim() {
        let map: PopularityMap = [("abc", 3)].into_iter().collect();
        assert_eq!(map.get(&ZoneId::new("abc")), 3);
        assert_eq!(map.get(&ZoneId::new("ABC")), 0);
    }

    #[test]
    fn missing_entries_default_to_zero() {
        let map = PopularityMap::new();
        assert_eq!(map.get(&ZoneId::from(42)), 0);
        assert!(parse_stats(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_stats("not json").is_err());
        assert!(parse_stats(r#"{"files":"nope"}"#).is_err());
    }
}
