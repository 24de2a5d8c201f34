use js_sys::{Function, Reflect};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use zonedeck_shared::{Endpoints, ViewerState};

/// Fullscreen entry points, standard first, then vendor-prefixed variants.
const FULLSCREEN_METHODS: &[&str] = &[
    "requestFullscreen",
    "webkitRequestFullscreen",
    "mozRequestFullScreen",
    "msRequestFullscreen",
];

/// Ask the browser to show `el` fullscreen using whichever API it exposes.
/// Unsupported browsers and rejected requests are ignored.
pub fn request_fullscreen(el: &web_sys::Element) {
    for name in FULLSCREEN_METHODS {
        let Ok(method) = Reflect::get(el.as_ref(), &JsValue::from_str(name)) else {
            continue;
        };
        let Ok(method) = method.dyn_into::<Function>() else {
            continue;
        };
        if let Ok(result) = method.call0(el.as_ref())
            && let Ok(promise) = result.dyn_into::<js_sys::Promise>()
        {
            // Await the request so a rejection doesn't surface as unhandled.
            spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        }
        return;
    }
}

/// Suspend or restore scrolling of the page behind the modal.
pub fn set_page_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let style = body.style();
    if locked {
        style.set_property("overflow", "hidden").ok();
    } else {
        style.remove_property("overflow").ok();
    }
}

/// Modal overlay embedding the selected zone in an iframe.
#[component]
pub fn ZoneViewer() -> impl IntoView {
    let viewer: RwSignal<ViewerState> = expect_context();
    let endpoints: StoredValue<Endpoints> = expect_context();
    let frame_ref: NodeRef<leptos::html::Iframe> = NodeRef::new();

    Effect::new(move || {
        set_page_scroll_locked(viewer.with(ViewerState::scroll_locked));
    });

    let title = move || {
        viewer.with(|v| {
            v.session()
                .map(|s| s.name.clone())
                .unwrap_or_default()
        })
    };
    let subtitle = move || {
        viewer.with(|v| {
            v.session()
                .map(|s| format!("ID: #{}", s.id))
                .unwrap_or_default()
        })
    };
    let external_href = move || {
        viewer.with(|v| {
            v.session()
                .map(|s| endpoints.with_value(|e| e.content_for(&s.id)))
                .unwrap_or_default()
        })
    };

    let on_fullscreen = move |_: leptos::ev::MouseEvent| {
        if let Some(frame) = frame_ref.get_untracked() {
            request_fullscreen(frame.as_ref());
        }
    };
    let on_reset = move |_: leptos::ev::MouseEvent| {
        viewer.update(|v| {
            v.reset_frame();
        });
    };
    let on_reload = move |_: leptos::ev::MouseEvent| {
        endpoints.with_value(|e| {
            viewer.update(|v| {
                v.reload(e);
            });
        });
    };
    let on_close = move |_: leptos::ev::MouseEvent| viewer.update(ViewerState::close);

    view! {
        <div
            class="viewer-backdrop"
            style:display=move || if viewer.with(ViewerState::is_open) { "flex" } else { "none" }
            on:click=move |e: leptos::ev::MouseEvent| {
                // Only clicks on the backdrop itself, not bubbling from the dialog.
                if e.target() == e.current_target() {
                    viewer.update(ViewerState::close);
                }
            }
        >
            <div class="viewer-dialog" role="dialog" aria-modal="true">
                <div class="viewer-header">
                    <div class="viewer-titles">
                        <div class="viewer-title">{title}</div>
                        <div class="viewer-subtitle">{subtitle}</div>
                    </div>
                    <div class="viewer-actions">
                        <button class="viewer-button" title="Fullscreen" on:click=on_fullscreen>"Fullscreen"</button>
                        <button class="viewer-button" title="Load a blank page" on:click=on_reset>"about:blank"</button>
                        <button class="viewer-button" title="Reload zone" on:click=on_reload>"Reload"</button>
                        <a class="viewer-button" target="_blank" rel="noopener" href=external_href>"New tab"</a>
                        <button class="viewer-button viewer-close" title="Close (Esc)" on:click=on_close>"\u{00D7}"</button>
                    </div>
                </div>
                <iframe
                    node_ref=frame_ref
                    class="viewer-frame"
                    src=move || viewer.with(|v| v.frame_src().to_string())
                    allow="fullscreen; autoplay; gamepad"
                    allowfullscreen=true
                />
            </div>
        </div>
    }
}
