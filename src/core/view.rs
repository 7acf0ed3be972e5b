use glam::{Mat4, Vec3};

/// Point on a sphere of radius `far_plane / 2` that the camera should face
/// for the given viewing angles (radians).
///
/// The zenith angle is `π/2 − latitude`, so latitude 0 lands on the horizon.
pub fn look_target(longitude: f64, latitude: f64, far_plane: f32) -> Vec3 {
    let radius = far_plane as f64 / 2.0;
    let theta = std::f64::consts::FRAC_PI_2 - latitude;
    Vec3::new(
        (radius * theta.sin() * longitude.cos()) as f32,
        (radius * theta.cos()) as f32,
        (radius * theta.sin() * longitude.sin()) as f32,
    )
}

/// Unit direction from `eye` to `target`. Zero-length or non-finite
/// directions fall back to −Z.
pub fn look_direction(eye: Vec3, target: Vec3) -> Vec3 {
    let dir = target - eye;
    let len_sq = dir.length_squared();
    if !len_sq.is_finite() || len_sq == 0.0 {
        return Vec3::NEG_Z;
    }
    dir / len_sq.sqrt()
}

/// Right-handed view matrix for a camera at `eye` facing `target`.
///
/// Never produces NaN: degenerate targets face −Z, and a direction parallel
/// to `up` is nudged off the pole before the basis is built.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let mut dir = look_direction(eye, target);
    if dir.cross(up).length_squared() < 1e-10 {
        if up.z.abs() >= 1.0 - f32::EPSILON {
            dir.x += 1e-4;
        } else {
            dir.z += 1e-4;
        }
        dir = dir.normalize();
    }
    Mat4::look_to_rh(eye, dir, up)
}

/// Perspective camera parked at a fixed eye position; only its target and
/// aspect ratio change while the viewer runs.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    /// Aspect from a pixel size; zero heights are clamped so the projection
    /// stays finite while the canvas is collapsed.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Aim at the point on the viewing sphere for the given angles.
    pub fn aim(&mut self, longitude: f64, latitude: f64) {
        self.target = look_target(longitude, latitude, self.far);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        look_direction(self.eye, self.target)
    }

    /// Camera's own up axis in world space. Unlike world +Y it stays
    /// perpendicular to `forward`, also when looking at a pole.
    pub fn up(&self) -> Vec3 {
        self.view_matrix().inverse().y_axis.truncate().normalize_or_zero()
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.target, Vec3::Y)
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
