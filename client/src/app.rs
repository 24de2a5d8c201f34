use leptos::prelude::*;
use wasm_bindgen::JsCast;

use std::cell::RefCell;

use gloo_storage::Storage;
use zonedeck_shared::{CatalogState, Endpoints, SortKey, ViewerState};

use crate::catalog::{self, LoadCatalogInput, LoadStatus};
use crate::config::{self, SETTINGS_KEY};
use crate::grid::{CatalogGrid, Toolbar};
use crate::viewer::ZoneViewer;

const DARK_MODE_CLASS: &str = "dark-mode";

fn remove_loading_shell() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

fn apply_dark_mode(enabled: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    body.class_list()
        .toggle_with_force(DARK_MODE_CLASS, enabled)
        .ok();
}

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// Newtype wrappers so the two user settings get distinct context types.
#[derive(Clone, Copy)]
pub(crate) struct DarkMode(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct SortSetting(pub RwSignal<SortKey>);

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub sort: SortKey,
    pub dark_mode: bool,
}

impl Settings {
    /// The sort picker only offers real orderings, so an unknown stored key
    /// falls back to the default one instead of leaving the grid unsorted.
    fn normalized(mut self) -> Self {
        if self.sort == SortKey::None {
            self.sort = SortKey::default();
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort: SortKey::Name,
            dark_mode: false,
        }
    }
}

/// Root application component. Owns the catalog and viewer state and
/// provides them to the toolbar, grid and viewer via context.
#[component]
pub fn App() -> impl IntoView {
    let saved = gloo_storage::LocalStorage::get::<Settings>(SETTINGS_KEY)
        .unwrap_or_default()
        .normalized();

    let endpoints: StoredValue<Endpoints> = StoredValue::new(config::endpoints());
    let mut initial = CatalogState::default();
    initial.sort_by(saved.sort);
    let catalog: RwSignal<CatalogState> = RwSignal::new(initial);
    let status: RwSignal<LoadStatus> = RwSignal::new(LoadStatus::Loading);
    let viewer: RwSignal<ViewerState> = RwSignal::new(ViewerState::Closed);
    let fetch_nonce: RwSignal<u64> = RwSignal::new(0);
    let sort_setting: RwSignal<SortKey> = RwSignal::new(saved.sort);
    let dark_mode: RwSignal<bool> = RwSignal::new(saved.dark_mode);

    provide_context(endpoints);
    provide_context(catalog);
    provide_context(status);
    provide_context(viewer);
    provide_context(SortSetting(sort_setting));
    provide_context(DarkMode(dark_mode));

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            sort: sort_setting.get(),
            dark_mode: dark_mode.get(),
        };
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &settings);
    });

    Effect::new(move || {
        apply_dark_mode(dark_mode.get());
    });

    // Single startup load
    Effect::new(move || {
        catalog::load_catalog(LoadCatalogInput {
            catalog,
            status,
            viewer,
            fetch_nonce,
            endpoints,
        });
    });

    // Drop the static shell once the first load settles either way.
    Effect::new(move || {
        if status.get() == LoadStatus::Loading {
            return;
        }
        wasm_bindgen_futures::spawn_local(async {
            gloo_timers::future::TimeoutFuture::new(240).await;
            remove_loading_shell();
        });
    });

    // Global keyboard shortcuts
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                let key = e.key();
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();

                if key == "Escape" && viewer.with_untracked(ViewerState::is_open) {
                    viewer.update(ViewerState::close);
                    return;
                }

                // Don't intercept when typing in an input
                if target_tag == "INPUT" || target_tag == "TEXTAREA" || target_tag == "SELECT" {
                    if key == "Escape"
                        && let Some(el) = e
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    {
                        el.blur().ok();
                    }
                    return;
                }

                if key == "/" {
                    e.prevent_default();
                    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
                        return;
                    };
                    if let Some(el) = doc.query_selector("[data-search-input]").ok().flatten()
                        && let Ok(input) = el.dyn_into::<web_sys::HtmlElement>()
                    {
                        input.focus().ok();
                    }
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    view! {
        <div class="app-shell">
            <header class="app-header">
                <h1 class="app-title">"Zones"</h1>
                <Toolbar />
            </header>
            <main>
                <CatalogGrid />
            </main>
        </div>
        <ZoneViewer />
    }
}
