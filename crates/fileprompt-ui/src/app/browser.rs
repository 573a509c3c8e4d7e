//! Browser API glue: file lists, clipboard, blob downloads, drop-zone geometry.

use crate::core::selection::PendingFile;
use crate::core::view::DropZoneRect;
use gloo::file::{Blob, ObjectUrl};
use gloo::utils::{document, window};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, File, FileList, HtmlAnchorElement};

/// Wrap every file of a `FileList` for the selection store.
pub(crate) fn pending_files(list: Option<FileList>) -> Vec<PendingFile<File>> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|file| {
            let size = file_size(&file);
            PendingFile::new(file.name(), size, file)
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn file_size(file: &File) -> u64 {
    file.size().max(0.0) as u64
}

/// Bounding rectangle of the drop zone.
pub(crate) fn rect_of(element: &Element) -> DropZoneRect {
    let rect = element.get_bounding_client_rect();
    DropZoneRect {
        left: rect.left(),
        top: rect.top(),
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Write `text` through `navigator.clipboard.writeText`.
pub(crate) async fn copy_text(text: String) -> Result<(), String> {
    let navigator = window().navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(describe)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard API unavailable".to_string());
    }
    let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(describe)?
        .dyn_into::<Function>()
        .map_err(describe)?;
    let promise = write
        .call1(&clipboard, &JsValue::from_str(&text))
        .map_err(describe)?
        .dyn_into::<Promise>()
        .map_err(describe)?;
    JsFuture::from(promise).await.map(|_| ()).map_err(describe)
}

/// Offer `bytes` to the user as a file download named `filename`.
pub(crate) fn save_bytes(filename: &str, bytes: Vec<u8>) -> Result<(), String> {
    let url = ObjectUrl::from(Blob::new(bytes.as_slice()));
    let anchor = document()
        .create_element("a")
        .map_err(describe)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "anchor element unavailable".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let body = document()
        .body()
        .ok_or_else(|| "document body unavailable".to_string())?;
    body.append_child(&anchor).map_err(describe)?;
    anchor.click();
    anchor.remove();
    Ok(())
}

fn describe(value: impl Into<JsValue>) -> String {
    let value = value.into();
    value
        .as_string()
        .or_else(|| {
            Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
