use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// UV sphere meant to be viewed from the inside.
///
/// Rings run from the north pole (`θ = 0`, +Y) to the south pole, columns
/// sweep `φ` over a full turn. The X axis is mirrored so an equirectangular
/// image reads left-to-right from the centre. Texture coordinates use the
/// image's top-left origin; the pole rows shift `u` by half a column so each
/// pole triangle samples the middle of its slice.
pub fn inward_sphere(radius: f32, width_segments: u32, height_segments: u32) -> SphereMesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let cols = width_segments + 1;

    let mut vertices = Vec::with_capacity((cols * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            vertices.push(SphereVertex {
                position: [
                    radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ],
                uv: [u + u_offset, v],
            });
        }
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * cols + ix + 1;
            let b = iy * cols + ix;
            let c = (iy + 1) * cols + ix;
            let d = (iy + 1) * cols + ix + 1;
            // pole rows collapse to a single triangle per slice
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    SphereMesh { vertices, indices }
}
