use std::collections::BTreeMap;

use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use zonedeck_shared::snapshot::{StorageSnapshot, export_file_name};

/// Grace period before the download's object URL is released.
const REVOKE_DELAY_MS: u32 = 1_000;

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

/// Capture every local storage entry plus the page's cookie string.
pub fn capture() -> StorageSnapshot {
    let storage = LocalStorage::raw();
    let mut entries = BTreeMap::new();
    let len = storage.length().unwrap_or(0);
    for i in 0..len {
        let Ok(Some(key)) = storage.key(i) else {
            continue;
        };
        if let Ok(Some(value)) = storage.get_item(&key) {
            entries.insert(key, value);
        }
    }
    let cookies = html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default();
    StorageSnapshot { entries, cookies }
}

fn download_text(file_name: &str, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&text.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "could not create file".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "could not create download link".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let anchor = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        .ok_or("could not create download link")?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    // Revoking synchronously can cancel the download before it starts.
    Timeout::new(REVOKE_DELAY_MS, move || {
        web_sys::Url::revoke_object_url(&url).ok();
    })
    .forget();
    Ok(())
}

/// Save local storage and cookies to a `<timestamp>.data` file.
pub fn export_to_file() {
    let snapshot = capture();
    let file_name = export_file_name(chrono::Utc::now());
    match download_text(&file_name, &snapshot.encode()) {
        Ok(()) => web_sys::console::info_1(
            &format!(
                "storage_exported entries={} file={file_name}",
                snapshot.entries.len()
            )
            .into(),
        ),
        Err(e) => {
            web_sys::console::error_1(&format!("Export failed: {e}").into());
            alert(&format!("Export failed: {e}"));
        }
    }
}

/// Restore entries and cookies from an exported file. Whatever parses is
/// applied even if another part of the file is broken.
pub async fn import_from_file(file: web_sys::File) {
    let text = match JsFuture::from(file.text()).await {
        Ok(value) => value.as_string().unwrap_or_default(),
        Err(_) => {
            alert("Import failed: could not read file");
            return;
        }
    };

    let report = StorageSnapshot::decode(&text);

    let mut restored = 0usize;
    if let Some(entries) = &report.entries {
        let storage = LocalStorage::raw();
        for (key, value) in entries {
            if storage.set_item(key, value).is_ok() {
                restored += 1;
            }
        }
    }
    if let Some(doc) = html_document() {
        for cookie in &report.cookies {
            doc.set_cookie(cookie).ok();
        }
    }

    web_sys::console::info_1(
        &format!(
            "storage_imported entries={restored} cookies={} errors={}",
            report.cookies.len(),
            report.errors.len()
        )
        .into(),
    );

    if report.is_clean() {
        alert("Data imported. Reload the page to apply it.");
    } else {
        alert(&format!(
            "Imported with problems:\n{}",
            report.error_summary()
        ));
    }
}
