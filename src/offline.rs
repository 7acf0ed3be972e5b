use crate::dom;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Register the asset-caching service worker once the page has loaded.
///
/// Unsupported browsers are skipped; a failed registration is logged and the
/// viewer carries on without offline support.
pub fn register_service_worker(script_url: &'static str) {
    let Some(window) = web::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported =
        js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        log::info!("[offline] service workers unsupported, skipping");
        return;
    }

    let already_loaded = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if already_loaded {
        spawn_register(script_url);
    } else {
        dom::add_window_listener("load", move || spawn_register(script_url));
    }
}

fn spawn_register(script_url: &'static str) {
    spawn_local(async move {
        match register(script_url).await {
            Ok(reg) => log::info!("[offline] service worker registered, scope {}", reg.scope()),
            Err(e) => log::warn!("ServiceWorker registration failed: {:?}", e),
        }
    });
}

async fn register(script_url: &str) -> anyhow::Result<web::ServiceWorkerRegistration> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container = window.navigator().service_worker();
    let reg = JsFuture::from(container.register(script_url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    reg.dyn_into::<web::ServiceWorkerRegistration>()
        .map_err(|e| anyhow::anyhow!("unexpected registration value: {:?}", e))
}
