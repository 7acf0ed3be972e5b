// Web frontend wiring: asset locations, DOM hooks and presentation defaults.

// Assets, relative to the page
pub const PANORAMA_URL: &str = "resources/beach_dinner.jpg";
pub const AMBIENT_AUDIO_URL: &str = "resources/ocean.mp3";
pub const SERVICE_WORKER_URL: &str = "sw.js";

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const OVERLAY_OK_ID: &str = "overlay-ok";

// Neutral grey shown until the panorama has been decoded
pub const PLACEHOLDER_TEXEL: [u8; 4] = [40, 40, 44, 255];

// Clear colour behind the sphere (only visible through seams)
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

// Ambient loop level before spatialisation
pub const AMBIENT_GAIN: f32 = 1.0;
