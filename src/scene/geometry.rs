//! Procedural tessellation for the primitive vocabulary.
//!
//! All shapes are emitted in a canonical local frame (cones and cylinders
//! along +Y, quads in the XY plane) and placed by the node transform.

use crate::error::Diagnostic;

use super::vertex::{LineVertex, MeshVertex};

/// Raw tessellation output before index packing.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Fan-triangulates flat polygon index data.
///
/// `polygon_sizes` drives the walk through `polygons`: a polygon of k
/// vertices yields k-2 triangles anchored at its first vertex. Polygons
/// with fewer than three vertices are skipped but still consume their
/// indices so later polygons stay aligned. Triangles referencing an index
/// at or beyond `vertex_count` are dropped. Every degradation is recorded
/// in `diagnostics`.
pub fn fan_triangulate(
    polygons: &[u32],
    polygon_sizes: &[u32],
    vertex_count: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<u32> {
    let mut indices = Vec::new();
    let mut offset = 0usize;

    for (polygon, &size) in polygon_sizes.iter().enumerate() {
        let size = size as usize;

        if offset + size > polygons.len() {
            diagnostics.push(Diagnostic::PolygonIndexUnderrun {
                needed: size,
                available: polygons.len() - offset,
            });
            break;
        }

        let corners = &polygons[offset..offset + size];
        offset += size;

        if size < 3 {
            diagnostics.push(Diagnostic::DegeneratePolygon { polygon, size });
            continue;
        }

        for &index in corners {
            if index as usize >= vertex_count {
                diagnostics.push(Diagnostic::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        for i in 1..size - 1 {
            let (a, b, c) = (corners[0], corners[i], corners[i + 1]);
            let in_range = (a as usize) < vertex_count
                && (b as usize) < vertex_count
                && (c as usize) < vertex_count;
            if in_range {
                indices.push(a);
                indices.push(b);
                indices.push(c);
            }
        }
    }

    indices
}

/// Accumulates area-weighted face normals into each vertex and normalizes.
pub fn compute_vertex_normals(vertices: &mut [MeshVertex], indices: &[u32]) {
    for v in vertices.iter_mut() {
        v.normal = [0.0; 3];
    }

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let pa = vertices[a].position;
        let pb = vertices[b].position;
        let pc = vertices[c].position;

        let ab = [pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]];
        let ac = [pc[0] - pa[0], pc[1] - pa[1], pc[2] - pa[2]];
        let face = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];

        for &i in &[a, b, c] {
            vertices[i].normal[0] += face[0];
            vertices[i].normal[1] += face[1];
            vertices[i].normal[2] += face[2];
        }
    }

    for v in vertices.iter_mut() {
        let n = v.normal;
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 1e-12 {
            v.normal = [n[0] / len, n[1] / len, n[2] / len];
        }
    }
}

/// Latitude/longitude sphere centered at the origin, poles on the Z axis.
///
/// The grid is (width_segments + 1) x (height_segments + 1) vertices with
/// duplicated seam and pole rows; pole rows emit one triangle per quad
/// instead of two.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshBuffers {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let mut buffers = MeshBuffers::default();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();

            let normal = [sin_t * cos_p, sin_t * sin_p, cos_t];
            buffers.vertices.push(MeshVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let stride = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            if iy != 0 {
                buffers.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                buffers.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    buffers
}

/// Open or capped frustum along +Y, height centered at the origin.
///
/// The top ring sits at +height/2 with `radius_top`, the bottom at
/// -height/2 with `radius_bottom`. A zero radius collapses that ring to a
/// point and drops the matching cap and torso triangle, which is how cones
/// are produced.
pub fn capped_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshBuffers {
    let w = radial_segments.max(3);
    let half = height / 2.0;
    // A flat shape keeps radial torso normals.
    let slope = if height == 0.0 {
        0.0
    } else {
        (radius_bottom - radius_top) / height
    };

    let mut buffers = MeshBuffers::default();

    // Torso: two rings, top first.
    for iy in 0..=1u32 {
        let v = iy as f32;
        let radius = radius_top + v * (radius_bottom - radius_top);
        let y = half - v * height;

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let theta = u * std::f32::consts::TAU;
            let (sin_t, cos_t) = theta.sin_cos();

            let n = [sin_t, slope, cos_t];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            buffers.vertices.push(MeshVertex {
                position: [radius * sin_t, y, radius * cos_t],
                normal: [n[0] / len, n[1] / len, n[2] / len],
            });
        }
    }

    let stride = w + 1;
    for ix in 0..w {
        let a = ix;
        let b = stride + ix;
        let c = stride + ix + 1;
        let d = ix + 1;

        if radius_top > 0.0 {
            buffers.indices.extend_from_slice(&[a, b, d]);
        }
        if radius_bottom > 0.0 {
            buffers.indices.extend_from_slice(&[b, c, d]);
        }
    }

    if radius_top > 0.0 {
        emit_cap(&mut buffers, radius_top, half, 1.0, w);
    }
    if radius_bottom > 0.0 {
        emit_cap(&mut buffers, radius_bottom, -half, -1.0, w);
    }

    buffers
}

fn emit_cap(buffers: &mut MeshBuffers, radius: f32, y: f32, sign: f32, segments: u32) {
    let center = buffers.vertices.len() as u32;
    buffers.vertices.push(MeshVertex {
        position: [0.0, y, 0.0],
        normal: [0.0, sign, 0.0],
    });

    let ring = buffers.vertices.len() as u32;
    for ix in 0..=segments {
        let u = ix as f32 / segments as f32;
        let theta = u * std::f32::consts::TAU;
        let (sin_t, cos_t) = theta.sin_cos();
        buffers.vertices.push(MeshVertex {
            position: [radius * sin_t, y, radius * cos_t],
            normal: [0.0, sign, 0.0],
        });
    }

    for ix in 0..segments {
        if sign > 0.0 {
            buffers
                .indices
                .extend_from_slice(&[center, ring + ix, ring + ix + 1]);
        } else {
            buffers
                .indices
                .extend_from_slice(&[center, ring + ix + 1, ring + ix]);
        }
    }
}

pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> MeshBuffers {
    capped_cylinder(radius, radius, height, radial_segments)
}

/// Cone along +Y with the apex at +height/2.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshBuffers {
    capped_cylinder(0.0, radius, height, radial_segments)
}

/// Two-triangle rectangle in the XY plane, centered at the origin,
/// normal +Z.
pub fn quad(width: f32, height: f32) -> MeshBuffers {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let normal = [0.0, 0.0, 1.0];

    MeshBuffers {
        vertices: vec![
            MeshVertex {
                position: [-hw, -hh, 0.0],
                normal,
            },
            MeshVertex {
                position: [hw, -hh, 0.0],
                normal,
            },
            MeshVertex {
                position: [hw, hh, 0.0],
                normal,
            },
            MeshVertex {
                position: [-hw, hh, 0.0],
                normal,
            },
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

/// Origin axes gizmo: X red, Y green, Z blue.
pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    let origin = [0.0, 0.0, 0.0];
    vec![
        LineVertex {
            position: origin,
            color: [1.0, 0.0, 0.0],
        },
        LineVertex {
            position: [size, 0.0, 0.0],
            color: [1.0, 0.0, 0.0],
        },
        LineVertex {
            position: origin,
            color: [0.0, 1.0, 0.0],
        },
        LineVertex {
            position: [0.0, size, 0.0],
            color: [0.0, 1.0, 0.0],
        },
        LineVertex {
            position: origin,
            color: [0.0, 0.0, 1.0],
        },
        LineVertex {
            position: [0.0, 0.0, size],
            color: [0.0, 0.0, 1.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn fan_triangulates_a_quad() {
        let mut diags = Vec::new();
        let indices = fan_triangulate(&[0, 1, 2, 3], &[4], 4, &mut diags);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(diags.is_empty());
    }

    #[test]
    fn fan_emits_size_minus_two_triangles() {
        let mut diags = Vec::new();
        let hexagon: Vec<u32> = (0..6).collect();
        let indices = fan_triangulate(&hexagon, &[6], 6, &mut diags);
        assert_eq!(indices.len() / 3, 4);
        // Every triangle is anchored at the first corner.
        for tri in indices.chunks_exact(3) {
            assert_eq!(tri[0], 0);
        }
    }

    #[test]
    fn degenerate_polygon_consumes_indices_and_keeps_alignment() {
        let mut diags = Vec::new();
        let indices = fan_triangulate(&[9, 9, 0, 1, 2], &[2, 3], 10, &mut diags);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(
            diags,
            vec![Diagnostic::DegeneratePolygon {
                polygon: 0,
                size: 2
            }]
        );
    }

    #[test]
    fn underrun_stops_the_walk() {
        let mut diags = Vec::new();
        let indices = fan_triangulate(&[0, 1, 2], &[5], 10, &mut diags);
        assert!(indices.is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::PolygonIndexUnderrun {
                needed: 5,
                available: 3
            }]
        );
    }

    #[test]
    fn out_of_range_index_drops_its_triangles() {
        let mut diags = Vec::new();
        // Corner 7 poisons the second fan triangle only.
        let indices = fan_triangulate(&[0, 1, 2, 7], &[4], 3, &mut diags);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(
            diags,
            vec![Diagnostic::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            }]
        );
    }

    #[test]
    fn sphere_grid_counts() {
        let sphere = uv_sphere(1.0, 32, 24);
        assert_eq!(sphere.vertex_count(), 33 * 25);
        // One triangle per pole quad, two per interior quad.
        assert_eq!(sphere.triangle_count(), 2 * 32 * 23);
    }

    #[test]
    fn sphere_normals_are_radial_units() {
        let sphere = uv_sphere(2.0, 8, 6);
        for v in &sphere.vertices {
            let p = v.position;
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(r, 2.0, epsilon = EPSILON);
            for axis in 0..3 {
                assert_relative_eq!(v.normal[axis], p[axis] / 2.0, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn cone_apex_sits_at_positive_half_height() {
        let shape = cone(1.0, 2.0, 8);
        let max_y = shape
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        let min_y = shape
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        assert_relative_eq!(max_y, 1.0, epsilon = EPSILON);
        assert_relative_eq!(min_y, -1.0, epsilon = EPSILON);
        // One torso triangle per segment plus the base cap.
        assert_eq!(shape.triangle_count(), 8 + 8);
    }

    #[test]
    fn zero_height_cone_keeps_unit_normals() {
        let shape = cone(0.3, 0.0, 8);
        assert!(!shape.vertices.is_empty());
        for v in &shape.vertices {
            let n = v.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!(len.is_finite());
            assert_relative_eq!(len, 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn cylinder_has_both_caps() {
        let shape = cylinder(1.0, 2.0, 8);
        assert_eq!(shape.triangle_count(), 2 * 8 + 2 * 8);

        let top_cap = shape
            .vertices
            .iter()
            .filter(|v| v.normal == [0.0, 1.0, 0.0])
            .count();
        let bottom_cap = shape
            .vertices
            .iter()
            .filter(|v| v.normal == [0.0, -1.0, 0.0])
            .count();
        assert_eq!(top_cap, 1 + 9);
        assert_eq!(bottom_cap, 1 + 9);
    }

    #[test]
    fn quad_is_centered_with_forward_normal() {
        let shape = quad(4.0, 2.0);
        assert_eq!(shape.triangle_count(), 2);
        for v in &shape.vertices {
            assert!(v.position[0].abs() <= 2.0 + EPSILON);
            assert!(v.position[1].abs() <= 1.0 + EPSILON);
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn accumulated_normals_face_out_of_the_winding() {
        let mut vertices = vec![
            MeshVertex {
                position: [0.0, 0.0, 0.0],
                normal: [0.0; 3],
            },
            MeshVertex {
                position: [1.0, 0.0, 0.0],
                normal: [0.0; 3],
            },
            MeshVertex {
                position: [0.0, 1.0, 0.0],
                normal: [0.0; 3],
            },
        ];
        compute_vertex_normals(&mut vertices, &[0, 1, 2]);
        for v in &vertices {
            assert_relative_eq!(v.normal[2], 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn axes_gizmo_spans_three_colored_segments() {
        let lines = axes_lines(2.0);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1].position, [2.0, 0.0, 0.0]);
        assert_eq!(lines[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(lines[3].position, [0.0, 2.0, 0.0]);
        assert_eq!(lines[3].color, [0.0, 1.0, 0.0]);
        assert_eq!(lines[5].position, [0.0, 0.0, 2.0]);
        assert_eq!(lines[5].color, [0.0, 0.0, 1.0]);
    }
}
