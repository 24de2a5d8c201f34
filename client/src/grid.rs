use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use zonedeck_shared::view::{ZoneCard, render};
use zonedeck_shared::{CatalogState, Endpoints, SortKey, ViewerState, ZoneRecord};

use crate::app::{DarkMode, SortSetting};
use crate::catalog::LoadStatus;
use crate::storage;

/// Search box, sort picker, theme toggle and storage export/import.
#[component]
pub fn Toolbar() -> impl IntoView {
    let catalog: RwSignal<CatalogState> = expect_context();
    let SortSetting(sort_setting) = expect_context();
    let DarkMode(dark_mode) = expect_context();
    let import_ref: NodeRef<leptos::html::Input> = NodeRef::new();

    let on_search = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        catalog.update(|state| state.set_query(input.value()));
    };

    let on_sort = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(select) = target.dyn_into::<web_sys::HtmlSelectElement>() else {
            return;
        };
        let key = SortKey::parse(&select.value());
        sort_setting.set(key);
        catalog.update(|state| state.sort_by(key));
    };

    let on_import_pick = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = import_ref.get_untracked() {
            input.click();
        }
    };

    let on_import_file = move |e: leptos::ev::Event| {
        let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again later.
        input.set_value("");
        spawn_local(storage::import_from_file(file));
    };

    view! {
        <div class="toolbar">
            <input
                data-search-input=""
                class="search-input"
                type="search"
                placeholder="Search zones by name or ID..."
                prop:value=move || catalog.with(|state| state.query().to_string())
                on:input=on_search
            />
            <select class="sort-select" on:change=on_sort>
                {SortKey::ALL
                    .into_iter()
                    .map(|key| {
                        view! {
                            <option value=key.as_str() selected=move || sort_setting.get() == key>
                                {key.label()}
                            </option>
                        }
                    })
                    .collect::<Vec<_>>()}
            </select>
            <button class="toolbar-button" on:click=move |_| dark_mode.update(|v| *v = !*v)>
                {move || if dark_mode.get() { "Light mode" } else { "Dark mode" }}
            </button>
            <button class="toolbar-button" on:click=move |_| storage::export_to_file()>"Export data"</button>
            <button class="toolbar-button" on:click=on_import_pick>"Import data"</button>
            <input
                node_ref=import_ref
                type="file"
                accept=".data,.txt,text/plain"
                style="display: none;"
                on:change=on_import_file
            />
        </div>
    }
}

/// Swap a broken cover for the placeholder, once.
fn swap_to_fallback_cover(target: Option<web_sys::EventTarget>, fallback: &str) {
    let Some(img) = target.and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok()) else {
        return;
    };
    if img.get_attribute("src").as_deref() != Some(fallback) {
        img.set_src(fallback);
    }
}

/// A single zone card. The cover falls back to the placeholder once if it fails to load.
#[component]
fn ZoneCardView(card: ZoneCard) -> impl IntoView {
    let viewer: RwSignal<ViewerState> = expect_context();
    let endpoints: StoredValue<Endpoints> = expect_context();

    let fallback = card.fallback_cover_url.clone();

    let zone = ZoneRecord::new(card.id.clone(), card.name.clone());
    let on_open = move |_: leptos::ev::MouseEvent| {
        endpoints.with_value(|e| viewer.update(|v| v.open(&zone, e)));
    };

    view! {
        <div class="zone-card" on:click=on_open>
            <img
                class="zone-cover"
                src=card.cover_url
                alt=card.name.clone()
                loading="lazy"
                on:error=move |e| swap_to_fallback_cover(e.target(), &fallback)
            />
            <div class="zone-name">{card.name}</div>
            <div class="zone-meta">{card.meta}</div>
        </div>
    }
}

/// Catalog area: loading notice, load error, or the rendered cards.
#[component]
pub fn CatalogGrid() -> impl IntoView {
    let catalog: RwSignal<CatalogState> = expect_context();
    let status: RwSignal<LoadStatus> = expect_context();
    let endpoints: StoredValue<Endpoints> = expect_context();

    let view_model = Memo::new(move |_| {
        endpoints.with_value(|urls| catalog.with(|state| render(state, urls)))
    });

    view! {
        <div class="catalog">
            <div class="catalog-summary">
                {move || match status.get() {
                    LoadStatus::Ready => view_model.with(|v| v.summary.clone()),
                    _ => String::new(),
                }}
            </div>
            {move || match status.get() {
                LoadStatus::Loading => view! {
                    <div class="catalog-message">"Loading zones..."</div>
                }.into_any(),
                LoadStatus::Failed(e) => view! {
                    <div class="catalog-message catalog-error">{format!("Error loading zones: {e}")}</div>
                }.into_any(),
                LoadStatus::Ready => {
                    let model = view_model.get();
                    match model.empty_message {
                        Some(message) => view! {
                            <div class="catalog-message">{message}</div>
                        }.into_any(),
                        None => view! {
                            <div class="zone-grid">
                                {model
                                    .cards
                                    .into_iter()
                                    .map(|card| view! { <ZoneCardView card=card /> })
                                    .collect::<Vec<_>>()}
                            </div>
                        }.into_any(),
                    }
                }
            }}
        </div>
    }
}
