use crate::audio;
use crate::core::{PerspectiveCamera, ViewingAngles};
use crate::render;
use crate::sensor::WebTracker;
use image::RgbaImage;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the per-frame update touches, built once in `init`.
pub struct FrameContext<'a> {
    /// `None` when the platform has no usable orientation sensor; the view
    /// then stays at the default angles.
    pub tracker: Option<WebTracker>,
    pub camera: PerspectiveCamera,
    pub canvas: web::HtmlCanvasElement,
    pub listener: web::AudioListener,
    pub gpu: Option<render::GpuState<'a>>,
    /// Decoded panorama waiting to be uploaded by the next frame.
    pub queued_panorama: Rc<RefCell<Option<RgbaImage>>>,
}

impl<'a> FrameContext<'a> {
    pub fn angles(&self) -> ViewingAngles {
        self.tracker
            .as_ref()
            .map(|t| t.borrow().angles())
            .unwrap_or_default()
    }

    pub fn frame(&mut self) {
        let angles = self.angles();
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.set_viewport(w, h);
        self.camera.aim(angles.longitude, angles.latitude);

        audio::update_listener_to_camera(
            &self.listener,
            self.camera.eye,
            self.camera.forward(),
            self.camera.up(),
        );

        if let Some(g) = &mut self.gpu {
            if let Some(img) = self.queued_panorama.borrow_mut().take() {
                g.set_panorama(&img);
            }
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(self.camera.view_proj()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that keeps its pending handle so it can be cancelled.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            frame_ctx.borrow_mut().frame();
            pending_tick.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));
        Self { pending, tick }
    }

    /// Cancel the pending frame but keep the callback so `resume` can pick up again.
    pub fn pause(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    /// Schedule the next frame after a `pause`. Does nothing while running or
    /// once the loop has been stopped.
    pub fn resume(&self) {
        if self.pending.get().is_none() {
            self.pending.set(request_frame(&self.tick));
        }
    }

    /// Cancel the pending frame and drop the callback, which also releases the
    /// frame context it captured.
    pub fn stop(&self) {
        self.pause();
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
