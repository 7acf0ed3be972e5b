// Host-side tests for the orientation conversion and tracker.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod orientation {
    include!("../src/core/orientation.rs");
}
mod tracker {
    include!("../src/core/tracker.rs");
}

use glam::DQuat;
use orientation::*;
use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use tracker::*;

const EPS: f64 = 1e-9;

#[derive(Default)]
struct FakeSensor {
    starts: Cell<u32>,
    stops: Cell<u32>,
    refuse_start: Cell<bool>,
    refuse_stop: Cell<bool>,
}

fn refused(action: &'static str) -> SensorFault {
    SensorFault {
        action,
        reason: "NotAllowedError".into(),
    }
}

impl SensorControl for FakeSensor {
    fn start(&self) -> Result<(), SensorFault> {
        self.starts.set(self.starts.get() + 1);
        if self.refuse_start.get() {
            return Err(refused("start"));
        }
        Ok(())
    }
    fn stop(&self) -> Result<(), SensorFault> {
        self.stops.set(self.stops.get() + 1);
        if self.refuse_stop.get() {
            return Err(refused("stop"));
        }
        Ok(())
    }
}

fn running_tracker() -> OrientationTracker<FakeSensor> {
    let mut t = OrientationTracker::new(FakeSensor::default());
    t.start().unwrap();
    t
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

const IDENTITY: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

#[test]
fn identity_reading_upright_looks_at_default() {
    let mut t = running_tracker();
    let angles = t.on_reading(IDENTITY, ScreenAngle::UPRIGHT).unwrap();
    assert!(approx(t.heading_offset().unwrap(), 0.0));
    assert!(approx(angles.longitude, 0.0));
    assert!(approx(angles.latitude, -FRAC_PI_2));
    assert_eq!(angles, t.angles());
}

#[test]
fn angles_default_to_zero_before_first_reading() {
    let t = running_tracker();
    assert_eq!(t.longitude(), 0.0);
    assert_eq!(t.latitude(), 0.0);
    assert!(t.heading_offset().is_none());
}

#[test]
fn first_reading_always_faces_forward() {
    let mut t = running_tracker();
    let q = DQuat::from_rotation_z(1.2).to_array();
    let angles = t.on_reading(q, ScreenAngle::UPRIGHT).unwrap();
    assert!(approx(t.heading_offset().unwrap(), -1.2));
    assert!(approx(angles.longitude, 0.0));
}

#[test]
fn heading_offset_is_latched_by_first_reading() {
    let mut t = running_tracker();
    t.on_reading(DQuat::from_rotation_z(0.3).to_array(), ScreenAngle::UPRIGHT);
    let angles = t
        .on_reading(DQuat::from_rotation_z(0.8).to_array(), ScreenAngle::UPRIGHT)
        .unwrap();
    assert!(approx(t.heading_offset().unwrap(), -0.3));
    // turning further by 0.5 rad moves longitude the other way
    assert!(approx(angles.longitude, -0.5));
}

#[test]
fn landscape_90_first_reading_adds_quarter_turn_to_offset() {
    let mut t = running_tracker();
    let q = DQuat::from_rotation_z(0.4).to_array();
    let angles = t.on_reading(q, ScreenAngle::LANDSCAPE_90).unwrap();
    assert!(approx(t.heading_offset().unwrap(), -0.4 + FRAC_PI_2));
    assert!(approx(angles.longitude, 0.0));
    assert!(approx(angles.latitude, -FRAC_PI_2));
}

#[test]
fn landscape_270_scenario() {
    let mut t = running_tracker();
    // identity first, so the captured offset is 0
    t.on_reading(IDENTITY, ScreenAngle::LANDSCAPE_270);
    assert!(approx(t.heading_offset().unwrap(), 0.0));
    let angles = t
        .on_reading(DQuat::from_rotation_z(FRAC_PI_4).to_array(), ScreenAngle::LANDSCAPE_270)
        .unwrap();
    assert!(approx(angles.longitude, -FRAC_PI_4 - FRAC_PI_2));
    assert!(approx(angles.latitude, -FRAC_PI_2));
}

#[test]
fn branch_shift_between_upright_and_landscape_90() {
    let euler = EulerAngles {
        x: 0.25,
        y: -0.6,
        z: 0.9,
    };
    let offset = 0.1;
    let up = viewing_angles(&euler, offset, ScreenAngle::UPRIGHT);
    let land = viewing_angles(&euler, offset, ScreenAngle::LANDSCAPE_90);
    assert!(approx(land.longitude - up.longitude, FRAC_PI_2));
    assert!(approx(up.latitude, 0.25 - FRAC_PI_2));
    assert!(approx(land.latitude, 0.6 - FRAC_PI_2));

    let right = viewing_angles(&euler, offset, ScreenAngle::LANDSCAPE_270);
    assert!(approx(right.longitude - up.longitude, -FRAC_PI_2));
    assert!(approx(right.latitude, -0.6 - FRAC_PI_2));
}

#[test]
fn tilt_lands_on_x_upright_and_y_in_landscape() {
    let tilt = DQuat::from_rotation_x(0.5).to_array();

    let mut upright = running_tracker();
    let a = upright.on_reading(tilt, ScreenAngle::UPRIGHT).unwrap();
    assert!(approx(a.latitude, 0.5 - FRAC_PI_2));

    let mut landscape = running_tracker();
    let b = landscape.on_reading(tilt, ScreenAngle::LANDSCAPE_90).unwrap();
    assert!(approx(b.latitude, -FRAC_PI_2));
}

#[test]
fn axis_order_follows_screen_angle() {
    assert_eq!(ScreenAngle(0).axis_order(), AxisOrder::Zyx);
    assert_eq!(ScreenAngle(90).axis_order(), AxisOrder::Zxy);
    assert_eq!(ScreenAngle(270).axis_order(), AxisOrder::Zxy);
    assert_eq!(ScreenAngle(180).axis_order(), AxisOrder::Zxy);
}

#[test]
fn unexpected_screen_angle_uses_upright_mapping() {
    let euler = EulerAngles {
        x: 0.3,
        y: 0.7,
        z: -0.2,
    };
    let odd = viewing_angles(&euler, 0.05, ScreenAngle(180));
    let up = viewing_angles(&euler, 0.05, ScreenAngle::UPRIGHT);
    assert_eq!(odd, up);
    assert!(approx(initial_heading(&euler, ScreenAngle(180)), 0.2));
}

#[test]
fn euler_decomposition_orders() {
    let q = DQuat::from_euler(glam::EulerRot::ZYX, 0.4, 0.2, -0.3);
    let e = EulerAngles::from_quaternion(q, AxisOrder::Zyx);
    assert!(approx(e.z, 0.4) && approx(e.y, 0.2) && approx(e.x, -0.3));

    let q = DQuat::from_euler(glam::EulerRot::ZXY, 0.4, 0.2, -0.3);
    let e = EulerAngles::from_quaternion(q, AxisOrder::Zxy);
    assert!(approx(e.z, 0.4) && approx(e.x, 0.2) && approx(e.y, -0.3));
}

#[test]
fn restart_keeps_captured_offset() {
    let mut t = running_tracker();
    t.on_reading(DQuat::from_rotation_z(0.7).to_array(), ScreenAngle::UPRIGHT);
    t.stop();
    t.start().unwrap();
    let angles = t.on_reading(IDENTITY, ScreenAngle::UPRIGHT).unwrap();
    assert!(approx(t.heading_offset().unwrap(), -0.7));
    assert!(approx(angles.longitude, 0.7));
}

#[test]
fn readings_while_stopped_leave_angles_frozen() {
    let mut t = running_tracker();
    let before = t
        .on_reading(DQuat::from_rotation_x(0.2).to_array(), ScreenAngle::UPRIGHT)
        .unwrap();
    t.stop();
    assert_eq!(t.state(), TrackerState::Stopped);
    assert!(t
        .on_reading(DQuat::from_rotation_x(1.0).to_array(), ScreenAngle::UPRIGHT)
        .is_none());
    assert_eq!(t.angles(), before);
}

#[test]
fn lifecycle_delegates_once_to_sensor() {
    let mut t = OrientationTracker::new(FakeSensor::default());
    assert_eq!(t.state(), TrackerState::Stopped);
    t.start().unwrap();
    t.start().unwrap();
    assert_eq!(t.state(), TrackerState::Running);
    assert_eq!(t.sensor().starts.get(), 1);
    t.stop();
    t.stop();
    assert_eq!(t.sensor().stops.get(), 1);
    t.start().unwrap();
    assert_eq!(t.sensor().starts.get(), 2);
}

#[test]
fn malformed_reading_propagates_nan() {
    let mut t = running_tracker();
    let angles = t
        .on_reading([f64::NAN, 0.0, 0.0, 1.0], ScreenAngle::UPRIGHT)
        .unwrap();
    assert!(angles.longitude.is_nan());
    assert!(angles.latitude.is_nan());
}

#[test]
fn refused_start_leaves_tracker_stopped() {
    let mut t = OrientationTracker::new(FakeSensor::default());
    t.sensor().refuse_start.set(true);
    let err = t.start().unwrap_err();
    assert_eq!(err.action, "start");
    assert_eq!(err.to_string(), "sensor start failed: NotAllowedError");
    assert_eq!(t.state(), TrackerState::Stopped);
    assert!(t.on_reading(IDENTITY, ScreenAngle::UPRIGHT).is_none());
    assert_eq!(t.heading_offset(), None);

    t.sensor().refuse_start.set(false);
    t.start().unwrap();
    assert_eq!(t.state(), TrackerState::Running);
    assert_eq!(t.sensor().starts.get(), 2);
}

#[test]
fn refused_stop_still_stops_tracker() {
    let mut t = running_tracker();
    t.sensor().refuse_stop.set(true);
    t.stop();
    assert_eq!(t.state(), TrackerState::Stopped);
    assert_eq!(t.sensor().stops.get(), 1);
}

#[test]
fn sensor_error_stops_tracker_and_freezes_angles() {
    let mut t = running_tracker();
    let before = t
        .on_reading(DQuat::from_rotation_z(0.3).to_array(), ScreenAngle::UPRIGHT)
        .unwrap();
    t.on_sensor_error();
    assert_eq!(t.state(), TrackerState::Stopped);
    assert!(t.on_reading(IDENTITY, ScreenAngle::UPRIGHT).is_none());
    assert_eq!(t.angles(), before);

    // no stop call goes to a sensor the platform already deactivated
    assert_eq!(t.sensor().stops.get(), 0);
    t.start().unwrap();
    assert_eq!(t.sensor().starts.get(), 2);
}
