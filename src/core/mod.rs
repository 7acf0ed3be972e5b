pub mod constants;
pub mod lifecycle;
pub mod orientation;
pub mod panorama;
pub mod sphere;
pub mod tracker;
pub mod view;

pub use constants::*;
pub use orientation::{ScreenAngle, ViewingAngles};
pub use panorama::decode_panorama;
pub use sphere::{inward_sphere, SphereMesh, SphereVertex};
pub use lifecycle::{page_action, PageAction, PageTransition};
pub use tracker::{OrientationTracker, SensorControl, SensorFault};
pub use view::PerspectiveCamera;

// Shaders bundled as string constants
pub static PANORAMA_WGSL: &str = include_str!("../../shaders/panorama.wgsl");
