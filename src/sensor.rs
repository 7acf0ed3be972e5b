use crate::core::{
    OrientationTracker, ScreenAngle, SensorControl, SensorFault, SENSOR_FREQUENCY_HZ,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

// Generic Sensor API bindings; web-sys does not ship these.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = web::EventTarget)]
    #[derive(Debug, Clone)]
    pub type RelativeOrientationSensor;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &js_sys::Object) -> Result<RelativeOrientationSensor, JsValue>;

    #[wasm_bindgen(method, catch, js_name = start)]
    fn try_start(this: &RelativeOrientationSensor) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = stop)]
    fn try_stop(this: &RelativeOrientationSensor) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter)]
    fn quaternion(this: &RelativeOrientationSensor) -> JsValue;
}

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("no window")]
    NoWindow,
    #[error("RelativeOrientationSensor is not available in this browser")]
    Unsupported,
    #[error("RelativeOrientationSensor construction failed: {0}")]
    Construct(String),
}

pub type WebTracker = Rc<RefCell<OrientationTracker<WebSensor>>>;

pub struct WebSensor {
    inner: RelativeOrientationSensor,
}

fn fault(action: &'static str, e: JsValue) -> SensorFault {
    SensorFault {
        action,
        reason: format!("{:?}", e),
    }
}

impl SensorControl for WebSensor {
    fn start(&self) -> Result<(), SensorFault> {
        self.inner.try_start().map_err(|e| fault("start", e))
    }

    fn stop(&self) -> Result<(), SensorFault> {
        self.inner.try_stop().map_err(|e| fault("stop", e))
    }
}

impl WebSensor {
    pub fn new() -> Result<Self, SensorError> {
        let window = web::window().ok_or(SensorError::NoWindow)?;
        let supported = js_sys::Reflect::has(&window, &JsValue::from_str("RelativeOrientationSensor"))
            .unwrap_or(false);
        if !supported {
            return Err(SensorError::Unsupported);
        }
        let options = js_sys::Object::new();
        _ = js_sys::Reflect::set(
            &options,
            &JsValue::from_str("frequency"),
            &JsValue::from_f64(SENSOR_FREQUENCY_HZ),
        );
        let inner = RelativeOrientationSensor::new(&options)
            .map_err(|e| SensorError::Construct(format!("{:?}", e)))?;
        Ok(Self { inner })
    }

    /// Latest `[x, y, z, w]` sample, or `None` before the first reading.
    /// Missing or non-numeric components come through as NaN.
    pub fn reading(&self) -> Option<[f64; 4]> {
        let value = self.inner.quaternion();
        if !js_sys::Array::is_array(&value) {
            return None;
        }
        let arr: js_sys::Array = value.unchecked_into();
        let mut q = [f64::NAN; 4];
        for (i, c) in q.iter_mut().enumerate() {
            *c = arr.get(i as u32).as_f64().unwrap_or(f64::NAN);
        }
        Some(q)
    }
}

pub fn screen_angle() -> ScreenAngle {
    web::window()
        .and_then(|w| w.screen().ok())
        .and_then(|s| s.orientation().angle().ok())
        .map(ScreenAngle)
        .unwrap_or_default()
}

/// Build a tracker around the platform sensor and route its `reading` and
/// `error` events into it. The tracker is returned stopped.
pub fn create_tracker() -> Result<WebTracker, SensorError> {
    let sensor = WebSensor::new()?;
    let target: web::EventTarget = sensor.inner.clone().unchecked_into();
    let tracker = Rc::new(RefCell::new(OrientationTracker::new(sensor)));

    let tracker_reading = tracker.clone();
    let on_reading = Closure::wrap(Box::new(move || {
        let reading = tracker_reading.borrow().sensor().reading();
        if let Some(q) = reading {
            tracker_reading.borrow_mut().on_reading(q, screen_angle());
        }
    }) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("reading", on_reading.as_ref().unchecked_ref());
    on_reading.forget();

    // the platform deactivates the sensor after an error event
    let tracker_error = tracker.clone();
    let on_error = Closure::wrap(Box::new(move |ev: web::Event| {
        let err = js_sys::Reflect::get(&ev, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
        log::error!("[sensor] error event: {:?}", err);
        tracker_error.borrow_mut().on_sensor_error();
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();

    Ok(tracker)
}
