use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::popularity::PopularityMap;
use crate::zone::ZoneRecord;

/// Ordering applied to the catalog. Unknown keys leave the order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Name,
    Id,
    Popular,
    None,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Id, SortKey::Popular];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "name" => Self::Name,
            "id" => Self::Id,
            "popular" => Self::Popular,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
            Self::Popular => "popular",
            Self::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Id => "ID",
            Self::Popular => "Most popular",
            Self::None => "Unsorted",
        }
    }
}

impl From<String> for SortKey {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Multi-level name collation in the style of the Unicode collation
/// algorithm's default table for Latin-script names:
///
/// 1. base letters, ignoring accents and case (`Éclair` files under `e`);
/// 2. accents, unaccented first (`resume` before `résumé`);
/// 3. case, lowercase first (`resume` before `Resume`);
/// 4. the raw strings, so distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_marks(a).cmp(case_marks(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}

/// Numeric id comparison; ids that are not integers go last.
fn compare_ids(a: &ZoneRecord, b: &ZoneRecord) -> Ordering {
    match (a.id.numeric(), b.id.numeric()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Search predicate: case-insensitive substring of the name, or substring of the id.
/// An empty query matches everything.
pub fn matches_query(zone: &ZoneRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let lowered = query.to_lowercase();
    zone.name.to_lowercase().contains(&lowered) || zone.id.as_str().contains(query)
}

/// Session-wide catalog: the ordered zones, their popularity, and the active
/// sort/search inputs. Owned by the app root and read by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    zones: Vec<ZoneRecord>,
    popularity: PopularityMap,
    sort: SortKey,
    query: String,
}

impl CatalogState {
    pub fn new(zones: Vec<ZoneRecord>) -> Self {
        Self {
            zones,
            sort: SortKey::None,
            ..Self::default()
        }
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn popularity(&self) -> &PopularityMap {
        &self.popularity
    }

    pub fn set_popularity(&mut self, popularity: PopularityMap) {
        self.popularity = popularity;
    }

    pub fn downloads(&self, zone: &ZoneRecord) -> u64 {
        self.popularity.get(&zone.id)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reorder the zones in place. All branches are stable, so equal keys keep
    /// the order left by the previous sort.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = key;
        let popularity = &self.popularity;
        match key {
            SortKey::Name => self.zones.sort_by(|a, b| compare_names(&a.name, &b.name)),
            SortKey::Id => self.zones.sort_by(compare_ids),
            SortKey::Popular => self
                .zones
                .sort_by(|a, b| popularity.get(&b.id).cmp(&popularity.get(&a.id))),
            SortKey::None => {}
        }
    }

    /// Merge the result of the popularity fetch and re-apply the current sort.
    /// A failed fetch leaves every count at zero and hands back the reason so
    /// the caller can log it; it never invalidates the catalog.
    pub fn augment(&mut self, popularity: Result<PopularityMap, String>) -> Option<String> {
        match popularity {
            Ok(map) => {
                self.popularity = map;
                self.sort_by(self.sort);
                None
            }
            Err(reason) => Some(reason),
        }
    }

    /// Zones passing the current query, in catalog order.
    pub fn visible(&self) -> Vec<&ZoneRecord> {
        self.zones
            .iter()
            .filter(|zone| matches_query(zone, &self.query))
            .collect()
    }

    /// Find a zone by a loosely compared id (query parameter, deep link).
    pub fn find(&self, raw_id: &str) -> Option<&ZoneRecord> {
        self.zones.iter().find(|zone| zone.id.loosely_matches(raw_id))
    }
}
