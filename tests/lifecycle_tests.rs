// Host-side tests for page show/hide handling.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/core/lifecycle.rs");
}
mod orientation {
    include!("../src/core/orientation.rs");
}
mod tracker {
    include!("../src/core/tracker.rs");
}

use glam::DQuat;
use lifecycle::*;
use orientation::ScreenAngle;
use tracker::*;

struct NullSensor;

impl SensorControl for NullSensor {
    fn start(&self) -> Result<(), SensorFault> {
        Ok(())
    }
    fn stop(&self) -> Result<(), SensorFault> {
        Ok(())
    }
}

#[test]
fn back_forward_cache_pauses_instead_of_tearing_down() {
    assert_eq!(page_action(PageTransition::Hide, true), PageAction::Suspend);
    assert_eq!(page_action(PageTransition::Show, true), PageAction::Resume);
}

#[test]
fn real_unload_tears_down_and_first_show_is_ignored() {
    assert_eq!(page_action(PageTransition::Hide, false), PageAction::Teardown);
    assert_eq!(page_action(PageTransition::Show, false), PageAction::Ignore);
}

// Mirrors what the page does with the tracker on a bfcache round trip.
#[test]
fn tracker_follows_the_page_through_the_cache() {
    let mut t = OrientationTracker::new(NullSensor);
    t.start().unwrap();
    t.on_reading(DQuat::from_rotation_z(0.5).to_array(), ScreenAngle::UPRIGHT);

    for (transition, running) in [(PageTransition::Hide, false), (PageTransition::Show, true)] {
        match page_action(transition, true) {
            PageAction::Suspend | PageAction::Teardown => t.stop(),
            PageAction::Resume => t.start().unwrap(),
            PageAction::Ignore => {}
        }
        assert_eq!(t.state() == TrackerState::Running, running);
    }

    let angles = t
        .on_reading(DQuat::from_rotation_z(0.5).to_array(), ScreenAngle::UPRIGHT)
        .unwrap();
    assert!(angles.longitude.abs() < 1e-9);
    assert!((t.heading_offset().unwrap() + 0.5).abs() < 1e-9);
}
