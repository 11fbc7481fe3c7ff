//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and texture coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Face description for [`generate_box`]: outward normal plus the two in-plane
/// axes, chosen so that `u × v = normal`.
const BOX_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Generate an axis-aligned box centred at the origin
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let half = [width * 0.5, height * 0.5, depth * 0.5];

    for (normal, u, v) in BOX_FACES {
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let first = data.vertices.len() as u32;

        for (su, sv) in corners {
            let position = [
                (normal[0] + su * u[0] + sv * v[0]) * half[0],
                (normal[1] + su * u[1] + sv * v[1]) * half[1],
                (normal[2] + su * u[2] + sv * v[2]) * half[2],
            ];
            let uv = [(su + 1.0) * 0.5, (1.0 - sv) * 0.5];
            data.push_vertex(position, normal, uv);
        }

        data.indices
            .extend_from_slice(&[first, first + 1, first + 2, first + 2, first + 3, first]);
    }

    data
}

/// Generate a UV sphere of radius 1.0 centred at the origin
///
/// # Arguments
/// * `width_segments` - Number of segments around the equator (min 3)
/// * `height_segments` - Number of segments from pole to pole (min 2)
pub fn generate_sphere(width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(3);
    let h_segs = height_segments.max(2);

    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;
            let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

            // Normal is the same as position for a unit sphere
            let position = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            data.push_vertex(position, position, [u, 1.0 - v]);
        }
    }

    let row = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // Skip the degenerate triangles at the poles
            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h_segs - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Generate a closed cone with its apex on +Y
///
/// # Arguments
/// * `radius` - Radius of the base
/// * `height` - Distance from base to apex; the cone spans -height/2..height/2
/// * `radial_segments` - Number of sides (min 3); 4 makes a square pyramid
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = if height > 0.0 { radius / height } else { 0.0 };

    // Side: one apex vertex and one base vertex per column
    let mut apex = Vec::with_capacity(segs as usize + 1);
    let mut base = Vec::with_capacity(segs as usize + 1);
    for (row, ring_radius, y) in [(0, 0.0, half_height), (1, radius, -half_height)] {
        for x in 0..=segs {
            let u = x as f32 / segs as f32;
            let (sin_t, cos_t) = (u * 2.0 * PI).sin_cos();
            let normal = normalize([sin_t, slope, cos_t]);
            let index = data.push_vertex(
                [ring_radius * sin_t, y, ring_radius * cos_t],
                normal,
                [u, 1.0 - row as f32],
            );
            if row == 0 {
                apex.push(index);
            } else {
                base.push(index);
            }
        }
    }

    for x in 0..segs as usize {
        data.indices
            .extend_from_slice(&[base[x], base[x + 1], apex[x + 1]]);
    }

    // Base cap, facing -Y
    let centers: Vec<u32> = (0..segs)
        .map(|_| data.push_vertex([0.0, -half_height, 0.0], [0.0, -1.0, 0.0], [0.5, 0.5]))
        .collect();
    let rim: Vec<u32> = (0..=segs)
        .map(|x| {
            let (sin_t, cos_t) = (x as f32 / segs as f32 * 2.0 * PI).sin_cos();
            data.push_vertex(
                [radius * sin_t, -half_height, radius * cos_t],
                [0.0, -1.0, 0.0],
                [cos_t * 0.5 + 0.5, sin_t * 0.5 + 0.5],
            )
        })
        .collect();

    for x in 0..segs as usize {
        data.indices
            .extend_from_slice(&[rim[x + 1], rim[x], centers[x]]);
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Rotate by -90° around X to lay it flat as a floor.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.push_vertex([pos_x, pos_y, 0.0], [0.0, 0.0, 1.0], [u, v]);
        }
    }

    let row = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = iy * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;

            data.indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    data
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}
