#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{
    decode_panorama, page_action, PageAction, PageTransition, PerspectiveCamera, FAR_PLANE,
    FOV_Y_DEGREES, NEAR_PLANE, SOUND_POSITION,
};
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod frame;
mod offline;
mod overlay;
mod render;
mod sensor;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

struct AudioParts {
    audio_ctx: web::AudioContext,
    listener: web::AudioListener,
    ambient: web::GainNode,
}

fn build_audio() -> anyhow::Result<AudioParts> {
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let listener = audio_ctx.listener();
    let ambient = audio::build_ambient_source(&audio_ctx, SOUND_POSITION, AMBIENT_GAIN)?;
    log::info!(
        "[audio] ambient source at ({:.1},{:.1},{:.1})",
        SOUND_POSITION.x,
        SOUND_POSITION.y,
        SOUND_POSITION.z
    );
    Ok(AudioParts {
        audio_ctx,
        listener,
        ambient,
    })
}

// Browsers keep the context suspended until a user gesture.
fn wire_overlay_button(document: &web::Document, audio_ctx: &web::AudioContext) {
    overlay::show(document);
    let audio_ok = audio_ctx.clone();
    dom::add_click_listener(document, OVERLAY_OK_ID, move || {
        _ = audio_ok.resume();
        if let Some(d) = dom::window_document() {
            overlay::hide(&d);
        }
    });
}

// A tracker whose sensor refused to start is still returned so a later
// `pageshow` can retry.
fn start_tracker() -> Option<sensor::WebTracker> {
    match sensor::create_tracker() {
        Ok(tracker) => {
            if let Err(e) = tracker.borrow_mut().start() {
                log::warn!("orientation not started: {}", e);
            }
            Some(tracker)
        }
        Err(e) => {
            log::warn!("orientation disabled: {}", e);
            None
        }
    }
}

struct PageParts {
    frame_loop: frame::FrameLoop,
    tracker: Option<sensor::WebTracker>,
}

impl PageParts {
    fn apply(&self, action: PageAction) {
        match action {
            PageAction::Suspend => {
                self.frame_loop.pause();
                if let Some(t) = &self.tracker {
                    t.borrow_mut().stop();
                }
                log::info!("[page] suspended into back/forward cache");
            }
            PageAction::Teardown => {
                self.frame_loop.stop();
                if let Some(t) = &self.tracker {
                    t.borrow_mut().stop();
                }
                log::info!("[page] frame loop stopped");
            }
            PageAction::Resume => {
                if let Some(t) = &self.tracker {
                    if let Err(e) = t.borrow_mut().start() {
                        log::warn!("orientation not resumed: {}", e);
                    }
                }
                self.frame_loop.resume();
                log::info!("[page] resumed from back/forward cache");
            }
            PageAction::Ignore => {}
        }
    }
}

fn wire_page_lifecycle(parts: PageParts) {
    let parts = Rc::new(parts);
    for (event, transition) in [
        ("pagehide", PageTransition::Hide),
        ("pageshow", PageTransition::Show),
    ] {
        let parts = parts.clone();
        dom::add_page_transition_listener(event, move |persisted| {
            parts.apply(page_action(transition, persisted));
        });
    }
}

fn spawn_panorama_load(max_dimension: u32, queued: Rc<RefCell<Option<RgbaImage>>>) {
    spawn_local(async move {
        let bytes = match dom::fetch_bytes(PANORAMA_URL).await {
            Ok(b) => b,
            Err(e) => {
                log::error!("panorama load error: {:?}", e);
                return;
            }
        };
        log::info!("[assets] {} fetched ({} bytes)", PANORAMA_URL, bytes.len());
        match decode_panorama(&bytes, max_dimension) {
            Ok(img) => *queued.borrow_mut() = Some(img),
            Err(e) => log::error!("panorama decode error: {}", e),
        }
    });
}

fn spawn_audio_load(audio_ctx: web::AudioContext, input: web::GainNode) {
    spawn_local(async move {
        if let Err(e) = audio::play_ambient_loop(&audio_ctx, AMBIENT_AUDIO_URL, &input).await {
            log::error!("ambient audio error: {:?}", e);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");

    offline::register_service_worker(SERVICE_WORKER_URL);

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let AudioParts {
        audio_ctx,
        listener,
        ambient,
    } = build_audio()?;
    wire_overlay_button(&document, &audio_ctx);
    spawn_audio_load(audio_ctx.clone(), ambient);

    let tracker = start_tracker();

    let gpu = frame::init_gpu(&canvas).await;
    let queued_panorama: Rc<RefCell<Option<RgbaImage>>> = Rc::new(RefCell::new(None));
    match &gpu {
        Some(g) => spawn_panorama_load(g.max_texture_dimension(), queued_panorama.clone()),
        None => log::warn!("no renderer; skipping panorama load"),
    }

    let mut camera = PerspectiveCamera::new(FOV_Y_DEGREES, 1.0, NEAR_PLANE, FAR_PLANE);
    camera.set_viewport(canvas.width(), canvas.height());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        tracker: tracker.clone(),
        camera,
        canvas,
        listener,
        gpu,
        queued_panorama,
    }));
    let frame_loop = frame::FrameLoop::start(frame_ctx);

    wire_page_lifecycle(PageParts {
        frame_loop,
        tracker,
    });

    Ok(())
}
