use glam::{DQuat, EulerRot};
use std::f64::consts::FRAC_PI_2;

/// Display rotation relative to the device's natural orientation, in degrees,
/// as reported by `screen.orientation.angle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAngle(pub u16);

impl ScreenAngle {
    pub const UPRIGHT: Self = Self(0);
    pub const LANDSCAPE_90: Self = Self(90);
    pub const LANDSCAPE_270: Self = Self(270);

    #[inline]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Heading and tilt live on different physical axes once the device is
    /// rotated away from upright, so the decomposition order follows the screen.
    #[inline]
    pub fn axis_order(self) -> AxisOrder {
        if self.0 == 0 {
            AxisOrder::Zyx
        } else {
            AxisOrder::Zxy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    Zyx,
    Zxy,
}

/// Euler decomposition of an orientation reading, keyed by axis rather than
/// by position in the rotation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    pub fn from_quaternion(q: DQuat, order: AxisOrder) -> Self {
        match order {
            AxisOrder::Zyx => {
                let (z, y, x) = q.to_euler(EulerRot::ZYX);
                Self { x, y, z }
            }
            AxisOrder::Zxy => {
                let (z, x, y) = q.to_euler(EulerRot::ZXY);
                Self { x, y, z }
            }
        }
    }
}

/// Where inside the panorama the viewer is looking, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewingAngles {
    pub longitude: f64,
    pub latitude: f64,
}

/// Sensor quaternions arrive as `[x, y, z, w]`. No normalisation is applied:
/// malformed readings surface as NaN angles downstream.
#[inline]
pub fn quaternion_from_reading(reading: [f64; 4]) -> DQuat {
    DQuat::from_array(reading)
}

/// Heading captured from the first reading so that every session starts
/// facing the same way regardless of where the device was pointing.
pub fn initial_heading(euler: &EulerAngles, screen: ScreenAngle) -> f64 {
    let heading = -euler.z;
    if screen.degrees() == 90 {
        heading + FRAC_PI_2
    } else {
        heading
    }
}

pub fn viewing_angles(
    euler: &EulerAngles,
    heading_offset: f64,
    screen: ScreenAngle,
) -> ViewingAngles {
    let longitude = -euler.z - heading_offset;
    match screen.degrees() {
        90 => ViewingAngles {
            longitude: longitude + FRAC_PI_2,
            latitude: -euler.y - FRAC_PI_2,
        },
        270 => ViewingAngles {
            longitude: longitude - FRAC_PI_2,
            latitude: euler.y - FRAC_PI_2,
        },
        // 0 and anything unexpected (e.g. 180) use the upright mapping
        _ => ViewingAngles {
            longitude,
            latitude: euler.x - FRAC_PI_2,
        },
    }
}
