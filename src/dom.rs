use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attach a window-level listener for the lifetime of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// `pagehide` / `pageshow` listener; the handler receives
/// `PageTransitionEvent.persisted` (true when the page enters or leaves the
/// back/forward cache).
pub fn add_page_transition_listener(event: &str, mut handler: impl FnMut(bool) + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            let persisted = ev
                .dyn_ref::<web::PageTransitionEvent>()
                .map(|e| e.persisted())
                .unwrap_or(false);
            handler(persisted);
        }) as Box<dyn FnMut(web::Event)>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Fetch a same-origin asset into an `ArrayBuffer`. Non-2xx responses are errors.
pub async fn fetch_array_buffer(url: &str) -> anyhow::Result<js_sys::ArrayBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    buf.dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| anyhow::anyhow!("read {}: not an ArrayBuffer: {:?}", url, e))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let buf = fetch_array_buffer(url).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
