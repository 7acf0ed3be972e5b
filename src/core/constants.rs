use glam::Vec3;

// Scene geometry and sensor constants shared by the web frontend and host tests.

// Camera
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 200.0; // the look-at target sits on a sphere of radius FAR_PLANE / 2

// Panorama sphere
pub const SPHERE_RADIUS: f32 = 100.0;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 100;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 40;

// Orientation sensor
pub const SENSOR_FREQUENCY_HZ: f64 = 60.0;

// Ambient sound source
pub const SOUND_POSITION: Vec3 = Vec3::new(-40.0, 0.0, 0.0);
pub const SOUND_REF_DISTANCE: f64 = 40.0;
pub const SOUND_ROLLOFF_FACTOR: f64 = 1.0;
pub const SOUND_MAX_DISTANCE: f64 = 10_000.0;
