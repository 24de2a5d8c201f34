use crate::zone::ZoneId;

pub const DEFAULT_CATALOG_URL: &str = "/data/zones.json";
pub const DEFAULT_POPULARITY_URL: &str = "/data/stats.json";
pub const DEFAULT_COVER_URL: &str = "/covers/{id}.png";
pub const DEFAULT_CONTENT_URL: &str = "/zones/zone-{id}.html";
pub const DEFAULT_PLACEHOLDER_COVER: &str = "/img/placeholder.svg";

/// Frame source used when the viewer is closed or reset.
pub const BLANK_FRAME: &str = "about:blank";

const ID_PLACEHOLDER: &str = "{id}";

/// Remote locations the catalog reads from. Cover and content locations are
/// templates where `{id}` is replaced by the zone id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub catalog_url: String,
    pub popularity_url: String,
    pub cover_url: String,
    pub content_url: String,
    pub placeholder_cover: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            popularity_url: DEFAULT_POPULARITY_URL.to_string(),
            cover_url: DEFAULT_COVER_URL.to_string(),
            content_url: DEFAULT_CONTENT_URL.to_string(),
            placeholder_cover: DEFAULT_PLACEHOLDER_COVER.to_string(),
        }
    }
}

impl Endpoints {
    pub fn cover_for(&self, id: &ZoneId) -> String {
        fill_template(&self.cover_url, id)
    }

    pub fn content_for(&self, id: &ZoneId) -> String {
        fill_template(&self.content_url, id)
    }
}

/// Substitute `{id}` in a template. Templates without a placeholder get the id
/// appended, so a bare directory URL still resolves per zone.
pub fn fill_template(template: &str, id: &ZoneId) -> String {
    let encoded = urlencoding::encode(id.as_str());
    if template.contains(ID_PLACEHOLDER) {
        template.replace(ID_PLACEHOLDER, &encoded)
    } else {
        format!("{template}{encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_fill_id() {
        let endpoints = Endpoints::default();
        let id = ZoneId::from(12);
        assert_eq!(endpoints.cover_for(&id), "/covers/12.png");
        assert_eq!(endpoints.content_for(&id), "/zones/zone-12.html");
    }

    #[test]
    fn template_without_placeholder_appends() {
        assert_eq!(fill_template("/play/", &ZoneId::from(3)), "/play/3");
    }

    #[test]
    fn ids_are_url_encoded() {
        assert_eq!(
            fill_template("/c/{id}.png", &ZoneId::new("a b/c")),
            "/c/a%20b%2Fc.png"
        );
    }
}
