use zonedeck_shared::Endpoints;

pub const MOUNT_ELEMENT_ID: &str = "app";
pub const SETTINGS_KEY: &str = "zonedeck_settings";
pub const DEEP_LINK_PARAM: &str = "id";

const CATALOG_URL_ATTR: &str = "data-catalog-url";
const POPULARITY_URL_ATTR: &str = "data-popularity-url";
const COVER_URL_ATTR: &str = "data-cover-url";
const CONTENT_URL_ATTR: &str = "data-content-url";
const PLACEHOLDER_COVER_ATTR: &str = "data-placeholder-cover";

/// Use an override when it is present and non-blank.
fn pick(raw: Option<String>, fallback: String) -> String {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
}

/// Build endpoints from an attribute lookup, falling back to the defaults.
pub fn endpoints_with(attr: impl Fn(&str) -> Option<String>) -> Endpoints {
    let defaults = Endpoints::default();
    Endpoints {
        catalog_url: pick(attr(CATALOG_URL_ATTR), defaults.catalog_url),
        popularity_url: pick(attr(POPULARITY_URL_ATTR), defaults.popularity_url),
        cover_url: pick(attr(COVER_URL_ATTR), defaults.cover_url),
        content_url: pick(attr(CONTENT_URL_ATTR), defaults.content_url),
        placeholder_cover: pick(attr(PLACEHOLDER_COVER_ATTR), defaults.placeholder_cover),
    }
}

/// Endpoints configured through `data-*` attributes on the mount element.
pub fn endpoints() -> Endpoints {
    let mount = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ELEMENT_ID));
    match mount {
        Some(el) => endpoints_with(|name| el.get_attribute(name)),
        None => Endpoints::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(endpoints_with(|_| None), Endpoints::default());
    }

    #[test]
    fn overrides_apply_and_blank_is_ignored() {
        let endpoints = endpoints_with(|name| match name {
            "data-catalog-url" => Some(" https://cdn.example/zones.json ".to_string()),
            "data-cover-url" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(endpoints.catalog_url, "https://cdn.example/zones.json");
        assert_eq!(endpoints.cover_url, Endpoints::default().cover_url);
    }
}
