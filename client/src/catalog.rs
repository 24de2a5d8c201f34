use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use zonedeck_shared::popularity::StatsDocument;
use zonedeck_shared::{CatalogState, Endpoints, PopularityMap, ViewerState, ZoneRecord};

use crate::config::DEEP_LINK_PARAM;

/// Where the catalog area is in its single startup load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Fetch the master zone list.
pub async fn fetch_catalog(url: &str) -> Result<Vec<ZoneRecord>, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<Vec<ZoneRecord>>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Fetch per-file download totals and reduce them to zone popularity.
pub async fn fetch_popularity(url: &str) -> Result<PopularityMap, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let doc = resp
        .json::<StatsDocument>()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    Ok(zonedeck_shared::popularity::extract(&doc))
}

/// Zone id requested through the page URL (`?id=...`), if any.
pub fn deep_link_id() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get(DEEP_LINK_PARAM)
        .filter(|value| !value.trim().is_empty())
}

#[derive(Clone, Copy)]
pub struct LoadCatalogInput {
    pub catalog: RwSignal<CatalogState>,
    pub status: RwSignal<LoadStatus>,
    pub viewer: RwSignal<ViewerState>,
    pub fetch_nonce: RwSignal<u64>,
    pub endpoints: StoredValue<Endpoints>,
}

/// Load the catalog, publish it, then augment it with popularity.
///
/// The catalog fetch is required and its failure replaces the grid with the
/// error. The popularity fetch runs after the catalog is already on screen and
/// only ever degrades to zero counts. Results from a superseded load are dropped.
pub fn load_catalog(input: LoadCatalogInput) {
    let LoadCatalogInput {
        catalog,
        status,
        viewer,
        fetch_nonce,
        endpoints,
    } = input;

    let request_nonce = fetch_nonce.get_untracked().wrapping_add(1);
    fetch_nonce.set(request_nonce);
    status.set(LoadStatus::Loading);

    spawn_local(async move {
        let urls = endpoints.get_value();
        let zones = match fetch_catalog(&urls.catalog_url).await {
            Ok(zones) => zones,
            Err(e) => {
                if fetch_nonce.get_untracked() != request_nonce {
                    return;
                }
                web_sys::console::error_1(&format!("Catalog load failed: {e}").into());
                status.set(LoadStatus::Failed(e));
                return;
            }
        };
        if fetch_nonce.get_untracked() != request_nonce {
            return;
        }

        // Keep the sort and whatever the user typed while the load was in flight.
        let (sort, query) =
            catalog.with_untracked(|current| (current.sort_key(), current.query().to_string()));
        let mut state = CatalogState::new(zones);
        state.sort_by(sort);
        state.set_query(query);
        web_sys::console::info_1(&format!("catalog_loaded zones={}", state.len()).into());

        let raw_id = deep_link_id();
        viewer.update(|v| {
            v.open_deep_link(&state, raw_id.as_deref(), &urls);
        });

        catalog.set(state);
        status.set(LoadStatus::Ready);

        let popularity = fetch_popularity(&urls.popularity_url).await;
        if fetch_nonce.get_untracked() != request_nonce {
            return;
        }
        let mut warning = None;
        catalog.update(|state| warning = state.augment(popularity));
        match warning {
            Some(reason) => web_sys::console::warn_1(
                &format!("Popularity fetch failed, showing zero downloads: {reason}").into(),
            ),
            None => web_sys::console::info_1(
                &format!(
                    "popularity_loaded entries={}",
                    catalog.with_untracked(|state| state.popularity().len())
                )
                .into(),
            ),
        }
    });
}
