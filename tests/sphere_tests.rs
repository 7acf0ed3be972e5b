// Host-side tests for the panorama sphere mesh.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod sphere {
    include!("../src/core/sphere.rs");
}

use sphere::*;

#[test]
fn vertex_and_index_counts() {
    let mesh = inward_sphere(100.0, 100, 40);
    assert_eq!(mesh.vertices.len(), 101 * 41);
    // pole rows contribute one triangle per slice, the rest two
    assert_eq!(mesh.indices.len(), 100 * (2 * 40 - 2) * 3);
    assert_eq!(mesh.index_count() as usize, mesh.indices.len());
}

#[test]
fn indices_are_in_range() {
    let mesh = inward_sphere(10.0, 12, 6);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));
}

#[test]
fn every_vertex_lies_on_the_sphere() {
    let mesh = inward_sphere(100.0, 32, 16);
    for v in &mesh.vertices {
        let p = glam::Vec3::from(v.position);
        assert!((p.length() - 100.0).abs() < 1e-3);
    }
}

#[test]
fn first_ring_is_the_north_pole_with_top_row_uv() {
    let mesh = inward_sphere(50.0, 8, 4);
    let first = mesh.vertices[0];
    assert!((first.position[1] - 50.0).abs() < 1e-4);
    assert_eq!(first.uv[1], 0.0);
    let last = mesh.vertices[mesh.vertices.len() - 1];
    assert!((last.position[1] + 50.0).abs() < 1e-4);
    assert_eq!(last.uv[1], 1.0);
}

#[test]
fn x_axis_is_mirrored_for_inside_viewing() {
    let w = 8;
    let h = 4;
    let mesh = inward_sphere(1.0, w, h);
    // equator ring, first column: φ = 0
    let equator_start = mesh.vertices[((h / 2) * (w + 1)) as usize];
    assert!((equator_start.position[0] - 1.0).abs() < 1e-5);
    assert!(equator_start.position[2].abs() < 1e-5);
    assert_eq!(equator_start.uv, [0.0, 0.5]);
}

#[test]
fn pole_rows_shift_u_by_half_a_column() {
    let w = 10;
    let mesh = inward_sphere(1.0, w, 5);
    assert!((mesh.vertices[0].uv[0] - 0.05).abs() < 1e-6);
    let bottom = mesh.vertices[(5 * (w + 1)) as usize];
    assert!((bottom.uv[0] + 0.05).abs() < 1e-6);
}

#[test]
fn degenerate_segment_counts_are_clamped() {
    let mesh = inward_sphere(1.0, 0, 0);
    assert_eq!(mesh.vertices.len(), 4 * 3);
    assert!(!mesh.indices.is_empty());
}
