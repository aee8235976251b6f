use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use note_core::ports::{AddressBar, Clipboard, Clock, FileSaver, ImageEncoder};
use note_core::save::SaveFile;
use note_core::{DragController, NoteController, NoteError, Point, Ports, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Document, HtmlAnchorElement, MouseEvent};

pub const QR_IMAGE_ID: &str = "qr-code-image";

#[wasm_bindgen]
extern "C" {
    /// The page-global scannable-code widget.
    #[wasm_bindgen(js_name = QRCode)]
    type QrCodeWidget;

    #[wasm_bindgen(constructor, js_class = "QRCode", catch)]
    fn new(container: &web_sys::Element, options: &JsValue) -> std::result::Result<QrCodeWidget, JsValue>;
}

/// Best-effort text for a thrown JS value.
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

fn browser_error(value: JsValue) -> NoteError {
    NoteError::Browser(js_error_text(&value))
}

fn document() -> Result<Document> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| NoteError::Browser("no document on window".to_string()))
}

pub fn browser_ports() -> Ports {
    Ports {
        address_bar: Rc::new(BrowserAddressBar),
        clipboard: Rc::new(BrowserClipboard),
        image: Rc::new(QrImageEncoder::new(QR_IMAGE_ID)),
        files: Rc::new(BlobDownloader),
        clock: Rc::new(BrowserClock),
    }
}

pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    fn current_url(&self) -> String {
        window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn replace_url(&self, url: &str) -> Result<()> {
        let window = window().ok_or_else(|| NoteError::Browser("no window".to_string()))?;
        let history = window.history().map_err(browser_error)?;
        history
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(browser_error)
    }
}

pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let window = window().ok_or_else(|| NoteError::Clipboard("no window".to_string()))?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| NoteError::Clipboard(js_error_text(&e)))
    }
}

pub struct QrImageEncoder {
    container_id: &'static str,
}

impl QrImageEncoder {
    pub fn new(container_id: &'static str) -> Self {
        Self { container_id }
    }

    fn container(&self) -> Result<web_sys::Element> {
        document()?
            .get_element_by_id(self.container_id)
            .ok_or_else(|| NoteError::ImageEncoder(format!("#{} not found", self.container_id)))
    }
}

impl ImageEncoder for QrImageEncoder {
    fn clear(&self) -> Result<()> {
        self.container()?.set_inner_html("");
        Ok(())
    }

    fn render(&self, payload: &str, size: u32) -> Result<()> {
        let container = self.container()?;
        let options = js_sys::Object::new();
        for (key, value) in [
            ("text", JsValue::from_str(payload)),
            ("width", JsValue::from(size)),
            ("height", JsValue::from(size)),
        ] {
            js_sys::Reflect::set(&options, &JsValue::from_str(key), &value)
                .map_err(|e| NoteError::ImageEncoder(js_error_text(&e)))?;
        }

        QrCodeWidget::new(&container, &options)
            .map(|_| ())
            .map_err(|e| NoteError::ImageEncoder(js_error_text(&e)))
    }
}

/// Downloads through a temporary object URL that is revoked right after
/// the click.
pub struct BlobDownloader;

impl FileSaver for BlobDownloader {
    fn save(&self, file: &SaveFile) -> Result<()> {
        let document = document()?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(file.mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| NoteError::Download(js_error_text(&e)))?;

        let href = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| NoteError::Download(js_error_text(&e)))?;

        let clicked = document
            .create_element("a")
            .map_err(|e| NoteError::Download(js_error_text(&e)))
            .and_then(|element| {
                element
                    .dyn_into::<HtmlAnchorElement>()
                    .map_err(|_| NoteError::Download("anchor element unavailable".to_string()))
            })
            .map(|anchor| {
                anchor.set_href(&href);
                anchor.set_download(&file.filename);
                anchor.click();
            });

        if let Err(e) = web_sys::Url::revoke_object_url(&href) {
            dioxus_logger::tracing::warn!("Failed to revoke object url: {}", js_error_text(&e));
        }
        clicked
    }
}

pub struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Resolves on the next animation frame.
pub async fn next_animation_frame() {
    let (tx, rx) = futures::channel::oneshot::channel();
    let _frame = gloo_render::request_animation_frame(move |_| {
        let _ = tx.send(());
    });
    let _ = rx.await;
}

/// Prompt before leaving while the note has content.
pub fn install_unload_guard(controller: NoteController) {
    let Some(window) = window() else {
        return;
    };

    let guard = Closure::wrap(Box::new(move |event: web_sys::BeforeUnloadEvent| {
        if controller.should_confirm_unload() {
            event.prevent_default();
            event.set_return_value("");
        }
    }) as Box<dyn FnMut(web_sys::BeforeUnloadEvent)>);

    if let Err(e) =
        window.add_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref())
    {
        dioxus_logger::tracing::warn!("Failed to install unload guard: {}", js_error_text(&e));
    }

    // Keep listener alive for app lifetime.
    guard.forget();
}

/// Document-level move/release listeners for the preview drag, so a drag
/// keeps tracking and ends even when the pointer leaves the panel.
/// `transform` receives the new CSS transform.
pub fn install_drag_listeners(drag: Rc<RefCell<DragController>>, mut transform: Signal<String>) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let drag_for_move = drag.clone();
    let mousemove_closure = Closure::wrap(Box::new(move |e: MouseEvent| {
        let mut drag = drag_for_move.borrow_mut();
        if drag
            .pointer_move(Point::new(e.client_x(), e.client_y()))
            .is_some()
        {
            e.prevent_default();
            transform.set(drag.transform());
        }
    }) as Box<dyn FnMut(MouseEvent)>);

    let mouseup_closure = Closure::wrap(Box::new(move |_e: MouseEvent| {
        drag.borrow_mut().pointer_up();
    }) as Box<dyn FnMut(MouseEvent)>);

    for (event, closure) in [
        ("mousemove", &mousemove_closure),
        ("mouseup", &mouseup_closure),
    ] {
        if let Err(e) =
            document.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            dioxus_logger::tracing::warn!("Failed to add {} listener: {}", event, js_error_text(&e));
        }
    }

    // Leak the closures to keep them alive (they will be cleaned up when the page unloads)
    mousemove_closure.forget();
    mouseup_closure.forget();
}
