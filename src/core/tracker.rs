use super::orientation::{
    initial_heading, quaternion_from_reading, viewing_angles, EulerAngles, ScreenAngle,
    ViewingAngles,
};

/// A platform sensor refused a lifecycle call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("sensor {action} failed: {reason}")]
pub struct SensorFault {
    pub action: &'static str,
    pub reason: String,
}

/// Lifecycle controls of an underlying orientation sensor.
pub trait SensorControl {
    fn start(&self) -> Result<(), SensorFault>;
    fn stop(&self) -> Result<(), SensorFault>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Stopped,
    Running,
}

/// Turns raw orientation readings into viewing angles.
///
/// The tracker owns one sensor and forwards `start`/`stop` to it. The heading
/// offset is latched by the first reading and survives stop/start cycles for
/// the lifetime of the tracker.
pub struct OrientationTracker<S> {
    sensor: S,
    state: TrackerState,
    angles: ViewingAngles,
    heading_offset: Option<f64>,
}

impl<S: SensorControl> OrientationTracker<S> {
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            state: TrackerState::Stopped,
            angles: ViewingAngles::default(),
            heading_offset: None,
        }
    }

    /// Start the sensor. On failure the tracker stays stopped and the error
    /// is handed back; a later call retries.
    pub fn start(&mut self) -> Result<(), SensorFault> {
        if self.state == TrackerState::Running {
            return Ok(());
        }
        self.sensor.start()?;
        self.state = TrackerState::Running;
        log::info!("[tracker] started");
        Ok(())
    }

    /// Stop the sensor. The tracker is stopped afterwards even if the sensor
    /// complained.
    pub fn stop(&mut self) {
        if self.state == TrackerState::Stopped {
            return;
        }
        if let Err(e) = self.sensor.stop() {
            log::warn!("[tracker] {}", e);
        }
        self.state = TrackerState::Stopped;
        log::info!(
            "[tracker] stopped at lon={:.3} lat={:.3}",
            self.angles.longitude,
            self.angles.latitude
        );
    }

    /// The platform deactivated the sensor on its own (permission revoked,
    /// hardware gone). Angles stay where they were.
    pub fn on_sensor_error(&mut self) {
        if self.state == TrackerState::Running {
            self.state = TrackerState::Stopped;
            log::warn!("[tracker] sensor deactivated after an error");
        }
    }

    /// Feed one `[x, y, z, w]` reading taken while the screen was at `screen`.
    ///
    /// Returns the updated angles, or `None` when the tracker is stopped and
    /// the reading was dropped.
    pub fn on_reading(
        &mut self,
        reading: [f64; 4],
        screen: ScreenAngle,
    ) -> Option<ViewingAngles> {
        if self.state != TrackerState::Running {
            log::debug!("[tracker] reading ignored while stopped");
            return None;
        }
        let q = quaternion_from_reading(reading);
        let euler = EulerAngles::from_quaternion(q, screen.axis_order());
        let offset = match self.heading_offset {
            Some(offset) => offset,
            None => {
                let offset = initial_heading(&euler, screen);
                log::debug!(
                    "[tracker] initial heading {:.4} rad (screen {}°)",
                    offset,
                    screen.degrees()
                );
                self.heading_offset = Some(offset);
                offset
            }
        };
        self.angles = viewing_angles(&euler, offset, screen);
        Some(self.angles)
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.angles.longitude
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.angles.latitude
    }

    #[inline]
    pub fn angles(&self) -> ViewingAngles {
        self.angles
    }

    #[inline]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[inline]
    pub fn heading_offset(&self) -> Option<f64> {
        self.heading_offset
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}
